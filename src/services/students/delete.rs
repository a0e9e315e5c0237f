use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, ErrorResponse};
use crate::services::read_error_response;

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ErrorResponse::new(
                ErrorCode::NotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(read_error_response("fetch student", &e)),
    }

    // 名下仍有成绩时拒绝删除
    match storage.count_marks_for_student(student_id).await {
        Ok(0) => {}
        Ok(count) => return Ok(has_marks_response(count)),
        Err(e) => return Ok(read_error_response("count student marks", &e)),
    }

    match storage.delete_student(student_id).await {
        Ok(true) => {
            info!("Student {} deleted", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ErrorResponse::new(
            ErrorCode::NotFound,
            "Student not found",
        ))),
        // 并发写入的成绩由外键拦截
        Err(e) if e.is_constraint_violation() => Ok(has_marks_response(1)),
        Err(e) => {
            error!("Failed to delete student {}: {}", student_id, e);
            Ok(read_error_response("delete student", &e))
        }
    }
}

fn has_marks_response(count: u64) -> HttpResponse {
    HttpResponse::Conflict().json(
        ErrorResponse::new(
            ErrorCode::ConstraintViolation,
            "Student still has marks and cannot be deleted",
        )
        .details(format!("{count} mark(s) reference this student")),
    )
}
