use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MarkRejection, MarkService};
use crate::models::ApiResponse;
use crate::services::read_error_response;

pub async fn get_mark(
    service: &MarkService,
    request: &HttpRequest,
    mark_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_mark_by_id(mark_id).await {
        Ok(Some(mark)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            mark,
            "Mark retrieved successfully",
        ))),
        Ok(None) => Ok(MarkRejection::NotFound(mark_id).into_response()),
        Err(e) => Ok(read_error_response("fetch mark", &e)),
    }
}
