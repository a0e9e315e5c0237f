use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::{MarkRejection, MarkService, validate_mark_create};
use crate::models::{ApiResponse, marks::requests::CreateMarkRequest};

pub async fn create_mark(
    service: &MarkService,
    request: &HttpRequest,
    mark_data: CreateMarkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let new_mark = match validate_mark_create(&storage, mark_data).await {
        Ok(new_mark) => new_mark,
        Err(rejection) => {
            warn!("Mark rejected: {} ({})", rejection.message(), rejection.details());
            return Ok(rejection.into_response());
        }
    };

    // 预检查与写入之间的并发冲突由唯一索引拦截
    match storage.create_mark(new_mark).await {
        Ok(mark) => {
            info!(
                "Mark {} created for student {} in subject {} (semester {})",
                mark.id, mark.student_id, mark.subject_id, mark.semester
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(mark, "Mark created successfully")))
        }
        Err(e) => {
            error!("Failed to create mark: {}", e);
            Ok(MarkRejection::Storage(e).into_response())
        }
    }
}
