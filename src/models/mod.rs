pub mod common;
pub mod dashboard;
pub mod marks;
pub mod students;
pub mod subjects;
pub mod system;

pub use common::{ApiResponse, ErrorCode, ErrorResponse, PaginationInfo, RecordListParams};

// 程序启动时间，用于健康检查计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
