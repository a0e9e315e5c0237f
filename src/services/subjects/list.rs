use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, RecordListParams};
use crate::services::read_error_response;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    query: RecordListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(read_error_response("fetch subjects", &e)),
    }
}
