use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::RecordListParams;

// 创建成绩请求
//
// 所有字段在校验前均为可选，缺失字段由校验模块按名称报告。
// examDate 以字符串接收，以便区分缺失与格式错误。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct CreateMarkRequest {
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub marks_obtained: Option<f64>,
    pub max_marks: Option<f64>,
    pub exam_date: Option<String>,
    pub semester: Option<i64>,
}

// 更新成绩请求
//
// 学生和科目不可修改；学期变更引起的冲突由数据库唯一索引拦截。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct UpdateMarkRequest {
    pub marks_obtained: Option<f64>,
    pub max_marks: Option<f64>,
    pub exam_date: Option<String>,
    pub semester: Option<i64>,
}

// 成绩列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct MarkListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub semester: Option<i32>,
}

impl MarkListParams {
    pub fn list_params(&self) -> RecordListParams {
        RecordListParams {
            page: self.page,
            size: self.size,
            search: self.search.clone(),
        }
    }
}

/// 通过校验的新成绩，字段已规范化，可直接写入
#[derive(Debug, Clone, PartialEq)]
pub struct NewMark {
    pub student_id: i64,
    pub subject_id: i64,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub exam_date: chrono::NaiveDate,
    pub semester: i32,
}

/// 通过校验的成绩修改项
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkChanges {
    pub marks_obtained: Option<f64>,
    pub max_marks: Option<f64>,
    pub exam_date: Option<chrono::NaiveDate>,
    pub semester: Option<i32>,
}

impl MarkChanges {
    pub fn is_empty(&self) -> bool {
        self.marks_obtained.is_none()
            && self.max_marks.is_none()
            && self.exam_date.is_none()
            && self.semester.is_none()
    }
}
