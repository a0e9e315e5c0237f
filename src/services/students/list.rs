use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, RecordListParams};
use crate::services::read_error_response;

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: RecordListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_students_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(read_error_response("fetch students", &e)),
    }
}
