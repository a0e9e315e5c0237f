use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ErrorCode, ErrorResponse};

/// JSON 请求体解析失败时返回统一的 400 错误
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON payload rejected on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new(ErrorCode::BadRequest, "Invalid JSON payload").details(err.to_string()),
    );
    InternalError::from_response(err, response).into()
}

/// 查询参数解析失败时返回统一的 400 错误
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Query string rejected on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new(ErrorCode::BadRequest, "Invalid query parameters")
            .details(err.to_string()),
    );
    InternalError::from_response(err, response).into()
}
