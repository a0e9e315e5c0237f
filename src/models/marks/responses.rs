use super::entities::Mark;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 成绩列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct MarkListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Mark>,
}
