use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MarkRejection, MarkService};
use crate::models::ApiResponse;
use crate::services::read_error_response;

pub async fn delete_mark(
    service: &MarkService,
    request: &HttpRequest,
    mark_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_mark(mark_id).await {
        Ok(true) => {
            info!("Mark {} deleted", mark_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Mark deleted successfully")))
        }
        Ok(false) => Ok(MarkRejection::NotFound(mark_id).into_response()),
        Err(e) => Ok(read_error_response("delete mark", &e)),
    }
}
