use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubjectService, check_subject_fields};
use crate::models::{
    ApiResponse, ErrorCode, ErrorResponse, subjects::requests::UpdateSubjectRequest,
};
use crate::services::write_error_response;

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    update_data: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = check_subject_fields(
        update_data.subject_code.as_deref(),
        update_data.subject_name.as_deref(),
        update_data.credits,
    ) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.update_subject(subject_id, update_data).await {
        Ok(Some(subject)) => {
            info!("Subject {} updated", subject.id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(subject, "Subject updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorResponse::new(
            ErrorCode::NotFound,
            "Subject not found",
        ))),
        Err(e) => Ok(write_error_response("update subject", &e)),
    }
}
