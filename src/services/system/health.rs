use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::error;

use super::SystemService;
use crate::models::{
    ApiResponse, AppStartTime, ErrorCode, ErrorResponse, system::responses::HealthResponse,
};

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let now = chrono::Utc::now();
    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|t| t.start_datetime)
        .unwrap_or(now);

    let database = storage.ping().await;

    let health = HealthResponse {
        system_name: service.get_config().app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at,
        uptime_seconds: now.signed_duration_since(started_at).num_seconds(),
        database: if database.is_ok() { "ok" } else { "unavailable" }.to_string(),
    };

    match database {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(health, "Service is healthy"))),
        Err(e) => {
            error!("Health check failed: {}", e);
            Ok(HttpResponse::ServiceUnavailable().json(
                ErrorResponse::with_data(ErrorCode::InternalError, health, "Database unavailable")
                    .details(e.message()),
            ))
        }
    }
}
