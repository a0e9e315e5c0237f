use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success.as_i32(),
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success.as_i32(),
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

// 统一的错误响应结构
//
// `error` 为可读的错误信息，`details` 为补充说明，
// `data` 仅在需要回显冲突记录时出现（例如重复成绩）。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ErrorResponse<T: TS> {
    pub code: i32,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ErrorResponse<T> {
    pub fn with_data(code: ErrorCode, data: T, error: impl Into<String>) -> Self {
        Self {
            code: code.as_i32(),
            error: error.into(),
            details: None,
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl ErrorResponse<()> {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            code: code.as_i32(),
            error: error.into(),
            details: None,
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success(7_i64, "ok")).unwrap();
        assert_eq!(body["code"], 0);
        assert_eq!(body["message"], "ok");
        assert_eq!(body["data"], 7);
        assert!(body.get("timestamp").is_some());
    }

    #[test]
    fn test_error_envelope_omits_empty_fields() {
        let body =
            serde_json::to_value(ErrorResponse::new(ErrorCode::NotFound, "Student not found"))
                .unwrap();
        assert_eq!(body["code"], 3000);
        assert_eq!(body["error"], "Student not found");
        assert!(body.get("details").is_none());
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_error_envelope_with_details() {
        let body = serde_json::to_value(
            ErrorResponse::new(ErrorCode::InvalidSemester, "Invalid semester")
                .details("Semester should be between 1 and 8"),
        )
        .unwrap();
        assert_eq!(body["details"], "Semester should be between 1 and 8");
    }
}
