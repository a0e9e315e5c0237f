use serde::Serialize;
use ts_rs::TS;

// 实体数量统计
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct EntityCount {
    pub count: i64,
    // 本月新增数量
    pub added_this_month: i64,
}

// 成绩统计
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct MarkStats {
    pub count: i64,
    // 本月新增或修改的数量
    pub updated_this_month: i64,
    // 所有成绩百分比的平均值，保留两位小数
    pub average_percentage: f64,
}

// 仪表盘统计响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardStatsResponse {
    pub students: EntityCount,
    pub subjects: EntityCount,
    pub marks: MarkStats,
}
