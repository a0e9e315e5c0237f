//! 仪表盘统计

use super::SeaOrmStorage;
use crate::entity::marks::{Column as MarkColumn, Entity as Marks};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{RecordsError, Result};
use crate::models::dashboard::responses::{DashboardStatsResponse, EntityCount, MarkStats};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};

impl SeaOrmStorage {
    /// 仪表盘统计，`since` 之后创建或修改的记录计入本月
    pub async fn dashboard_stats_impl(&self, since: i64) -> Result<DashboardStatsResponse> {
        let students = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("统计学生数量失败", e))?;
        let students_this_month = Students::find()
            .filter(StudentColumn::CreatedAt.gte(since))
            .count(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("统计学生数量失败", e))?;

        let subjects = Subjects::find()
            .count(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("统计科目数量失败", e))?;
        let subjects_this_month = Subjects::find()
            .filter(SubjectColumn::CreatedAt.gte(since))
            .count(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("统计科目数量失败", e))?;

        let marks_this_month = Marks::find()
            .filter(MarkColumn::UpdatedAt.gte(since))
            .count(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("统计成绩数量失败", e))?;

        // 百分比不落库，取分数后在内存中求平均
        let scores: Vec<(f64, f64)> = Marks::find()
            .select_only()
            .column(MarkColumn::MarksObtained)
            .column(MarkColumn::MaxMarks)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询成绩分数失败", e))?;

        Ok(DashboardStatsResponse {
            students: EntityCount {
                count: students as i64,
                added_this_month: students_this_month as i64,
            },
            subjects: EntityCount {
                count: subjects as i64,
                added_this_month: subjects_this_month as i64,
            },
            marks: MarkStats {
                count: scores.len() as i64,
                updated_this_month: marks_this_month as i64,
                average_percentage: average_percentage(&scores),
            },
        })
    }
}

/// 平均百分比，按原始比例求平均后只取整一次；没有成绩时为 0
fn average_percentage(scores: &[(f64, f64)]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: f64 = scores
        .iter()
        .map(|&(obtained, max)| {
            if max > 0.0 {
                obtained / max * 100.0
            } else {
                0.0
            }
        })
        .sum();
    (sum / scores.len() as f64 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::average_percentage;
    use crate::storage::memory_storage;

    #[test]
    fn test_average_percentage() {
        assert_eq!(average_percentage(&[]), 0.0);
        assert_eq!(average_percentage(&[(85.0, 100.0), (45.0, 50.0)]), 87.5);
        assert_eq!(average_percentage(&[(1.0, 3.0)]), 33.33);
    }

    #[test]
    fn test_average_percentage_rounds_once() {
        // 33.33 与 55.56 的平均为 44.445，原始比例的平均为 44.444...
        assert_eq!(average_percentage(&[(1.0, 3.0), (5.0, 9.0)]), 44.44);
        assert_eq!(average_percentage(&[(5.0, 0.0), (50.0, 100.0)]), 25.0);
    }

    #[actix_web::test]
    async fn test_empty_store_stats() {
        let storage = memory_storage().await;
        let stats = storage.dashboard_stats(0).await.unwrap();
        assert_eq!(stats.students.count, 0);
        assert_eq!(stats.subjects.added_this_month, 0);
        assert_eq!(stats.marks.count, 0);
        assert_eq!(stats.marks.average_percentage, 0.0);
    }
}
