pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ErrorCode, ErrorResponse, RecordListParams,
    subjects::requests::{CreateSubjectRequest, UpdateSubjectRequest},
};
use crate::storage::Storage;
use crate::utils::validate::{validate_credits, validate_required_text};

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
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

    pub async fn list_subjects(
        &self,
        request: &HttpRequest,
        query: RecordListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_subjects(self, request, query).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        subject_data: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, request, subject_data).await
    }

    pub async fn get_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_subject(self, request, subject_id).await
    }

    pub async fn update_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        update_data: UpdateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_subject(self, request, subject_id, update_data).await
    }

    // 删除科目，仍有成绩引用时拒绝
    pub async fn delete_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_subject(self, request, subject_id).await
    }
}

/// 科目字段校验，未提供的字段跳过
pub(crate) fn check_subject_fields(
    subject_code: Option<&str>,
    subject_name: Option<&str>,
    credits: Option<i32>,
) -> Result<(), HttpResponse> {
    for (field, value) in [("subjectCode", subject_code), ("subjectName", subject_name)] {
        if let Some(value) = value
            && let Err(msg) = validate_required_text(field, value)
        {
            return Err(HttpResponse::BadRequest().json(
                ErrorResponse::new(ErrorCode::MissingField, "Missing required fields")
                    .details(msg),
            ));
        }
    }

    if let Some(credits) = credits
        && let Err(msg) = validate_credits(credits)
    {
        return Err(HttpResponse::BadRequest().json(
            ErrorResponse::new(ErrorCode::InvalidRange, "Invalid credits").details(msg),
        ));
    }

    Ok(())
}
