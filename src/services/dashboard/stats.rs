use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::DashboardService;
use crate::models::ApiResponse;
use crate::services::read_error_response;

pub async fn get_stats(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let since = month_start_timestamp(Utc::now());

    match storage.dashboard_stats(since).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Dashboard statistics retrieved successfully",
        ))),
        Err(e) => Ok(read_error_response("fetch dashboard statistics", &e)),
    }
}

/// 当月第一天零点（UTC）的时间戳
fn month_start_timestamp(now: DateTime<Utc>) -> i64 {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_start() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 13, 45, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(month_start_timestamp(now), expected.timestamp());
    }
}
