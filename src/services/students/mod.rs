pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ErrorCode, ErrorResponse, RecordListParams,
    students::requests::{CreateStudentRequest, UpdateStudentRequest},
};
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_required_text};

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 获取学生列表
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: RecordListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student_data).await
    }

    // 根据学生 ID 获取学生信息
    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    // 更新学生信息
    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update_data: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update_data).await
    }

    // 删除学生，名下仍有成绩时拒绝
    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }
}

/// 学生字段校验，未提供的字段跳过
pub(crate) fn check_student_fields(
    roll_no: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    email: Option<&str>,
) -> Result<(), HttpResponse> {
    for (field, value) in [
        ("rollNo", roll_no),
        ("firstName", first_name),
        ("lastName", last_name),
        ("email", email),
    ] {
        if let Some(value) = value
            && let Err(msg) = validate_required_text(field, value)
        {
            return Err(HttpResponse::BadRequest().json(
                ErrorResponse::new(ErrorCode::MissingField, "Missing required fields")
                    .details(msg),
            ));
        }
    }

    if let Some(email) = email
        && let Err(msg) = validate_email(email)
    {
        return Err(HttpResponse::BadRequest().json(ErrorResponse::new(ErrorCode::BadRequest, msg)));
    }

    Ok(())
}
