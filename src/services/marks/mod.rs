pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod validation;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::marks::requests::{CreateMarkRequest, MarkListParams, UpdateMarkRequest};
use crate::storage::Storage;

pub use validation::{MarkRejection, validate_mark_create, validate_mark_update};

pub struct MarkService {
    storage: Option<Arc<dyn Storage>>,
}

impl MarkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取成绩列表（关联学生和科目）
    pub async fn list_marks(
        &self,
        request: &HttpRequest,
        query: MarkListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_marks(self, request, query).await
    }

    // 校验后创建成绩
    pub async fn create_mark(
        &self,
        request: &HttpRequest,
        mark_data: CreateMarkRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_mark(self, request, mark_data).await
    }

    pub async fn get_mark(&self, request: &HttpRequest, mark_id: i64) -> ActixResult<HttpResponse> {
        get::get_mark(self, request, mark_id).await
    }

    pub async fn update_mark(
        &self,
        request: &HttpRequest,
        mark_id: i64,
        update_data: UpdateMarkRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_mark(self, request, mark_id, update_data).await
    }

    pub async fn delete_mark(
        &self,
        request: &HttpRequest,
        mark_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_mark(self, request, mark_id).await
    }
}
