use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode, ErrorResponse};
use crate::services::read_error_response;

pub async fn delete_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ErrorResponse::new(
                ErrorCode::NotFound,
                "Subject not found",
            )));
        }
        Err(e) => return Ok(read_error_response("fetch subject", &e)),
    }

    match storage.count_marks_for_subject(subject_id).await {
        Ok(0) => {}
        Ok(count) => return Ok(has_marks_response(count)),
        Err(e) => return Ok(read_error_response("count subject marks", &e)),
    }

    match storage.delete_subject(subject_id).await {
        Ok(true) => {
            info!("Subject {} deleted", subject_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ErrorResponse::new(
            ErrorCode::NotFound,
            "Subject not found",
        ))),
        Err(e) if e.is_constraint_violation() => Ok(has_marks_response(1)),
        Err(e) => {
            error!("Failed to delete subject {}: {}", subject_id, e);
            Ok(read_error_response("delete subject", &e))
        }
    }
}

fn has_marks_response(count: u64) -> HttpResponse {
    HttpResponse::Conflict().json(
        ErrorResponse::new(
            ErrorCode::ConstraintViolation,
            "Subject still has marks and cannot be deleted",
        )
        .details(format!("{count} mark(s) reference this subject")),
    )
}
