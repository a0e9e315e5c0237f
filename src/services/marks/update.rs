use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{MarkRejection, MarkService, validate_mark_update};
use crate::models::{ApiResponse, marks::requests::UpdateMarkRequest};

pub async fn update_mark(
    service: &MarkService,
    request: &HttpRequest,
    mark_id: i64,
    update_data: UpdateMarkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (existing, changes) = match validate_mark_update(&storage, mark_id, update_data).await {
        Ok(validated) => validated,
        Err(rejection) => {
            warn!("Mark {} update rejected: {}", mark_id, rejection.message());
            return Ok(rejection.into_response());
        }
    };

    if changes.is_empty() {
        return Ok(
            HttpResponse::Ok().json(ApiResponse::success(existing, "Mark updated successfully")),
        );
    }

    match storage.update_mark(mark_id, changes).await {
        Ok(Some(mark)) => {
            info!("Mark {} updated", mark.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(mark, "Mark updated successfully")))
        }
        Ok(None) => Ok(MarkRejection::NotFound(mark_id).into_response()),
        Err(e) => Ok(MarkRejection::Storage(e).into_response()),
    }
}
