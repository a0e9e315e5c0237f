use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{SubjectService, check_subject_fields};
use crate::models::{ApiResponse, subjects::requests::CreateSubjectRequest};
use crate::services::write_error_response;

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_data: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = check_subject_fields(
        Some(subject_data.subject_code.as_str()),
        Some(subject_data.subject_name.as_str()),
        Some(subject_data.credits),
    ) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.create_subject(subject_data).await {
        Ok(subject) => {
            info!("Subject {} created", subject.subject_code);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) => {
            error!("Failed to create subject: {}", e);
            Ok(write_error_response("create subject", &e))
        }
    }
}
