pub mod dashboard;
pub mod marks;
pub mod students;
pub mod subjects;
pub mod system;

pub use dashboard::DashboardService;
pub use marks::MarkService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;

use actix_web::HttpResponse;

use crate::errors::RecordsError;
use crate::models::{ErrorCode, ErrorResponse};

/// 存储层写入错误：唯一约束冲突返回 400，其余返回 500
pub(crate) fn write_error_response(action: &str, err: &RecordsError) -> HttpResponse {
    if err.is_constraint_violation() {
        HttpResponse::BadRequest().json(
            ErrorResponse::new(ErrorCode::ConstraintViolation, format!("Failed to {action}"))
                .details(err.message()),
        )
    } else {
        HttpResponse::InternalServerError().json(
            ErrorResponse::new(ErrorCode::InternalError, format!("Failed to {action}"))
                .details(err.message()),
        )
    }
}

/// 存储层读取错误，统一返回 500
pub(crate) fn read_error_response(action: &str, err: &RecordsError) -> HttpResponse {
    HttpResponse::InternalServerError().json(
        ErrorResponse::new(ErrorCode::InternalError, format!("Failed to {action}"))
            .details(err.message()),
    )
}
