use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::{ApiResponse, marks::requests::MarkListParams};
use crate::services::read_error_response;

pub async fn list_marks(
    service: &MarkService,
    request: &HttpRequest,
    query: MarkListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_marks_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Marks retrieved successfully",
        ))),
        Err(e) => Ok(read_error_response("fetch marks", &e)),
    }
}
