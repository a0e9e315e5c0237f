use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ErrorCode, ErrorResponse};

/// 路径中的记录 ID（`{id}`），非数字时直接返回 400
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_path_id(req, "id").map(SafeIDI64))
    }
}

fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();

    raw.parse::<i64>().map_err(|e| {
        let response = HttpResponse::BadRequest().json(
            ErrorResponse::new(ErrorCode::BadRequest, format!("Invalid {name}: '{raw}'"))
                .details(e.to_string()),
        );
        InternalError::from_response(e, response).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_numeric_id_is_extracted() {
        let req = TestRequest::default().param("id", "42").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_non_numeric_id_is_bad_request() {
        let req = TestRequest::default().param("id", "abc").to_http_request();
        let err = SafeIDI64::extract(&req).await.unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
    }
}
