use std::sync::Arc;

use crate::models::{
    RecordListParams,
    dashboard::responses::DashboardStatsResponse,
    marks::{
        entities::Mark,
        requests::{MarkChanges, MarkListParams, NewMark},
        responses::MarkListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取学生信息
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: RecordListParams,
    ) -> Result<StudentListResponse>;
    // 更新学生信息
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 删除学生
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 统计学生名下的成绩数量
    async fn count_marks_for_student(&self, student_id: i64) -> Result<u64>;

    /// 科目管理方法
    // 创建科目
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    // 通过ID获取科目信息
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    // 列出科目
    async fn list_subjects_with_pagination(
        &self,
        query: RecordListParams,
    ) -> Result<SubjectListResponse>;
    // 更新科目信息
    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    // 删除科目
    async fn delete_subject(&self, id: i64) -> Result<bool>;
    // 统计科目下的成绩数量
    async fn count_marks_for_subject(&self, subject_id: i64) -> Result<u64>;

    /// 成绩管理方法（返回值均已关联学生和科目信息）
    // 写入已校验的成绩
    async fn create_mark(&self, mark: NewMark) -> Result<Mark>;
    // 通过ID获取成绩
    async fn get_mark_by_id(&self, id: i64) -> Result<Option<Mark>>;
    // 按 (学生, 科目, 学期) 查找成绩
    async fn find_mark_by_student_subject_semester(
        &self,
        student_id: i64,
        subject_id: i64,
        semester: i32,
    ) -> Result<Option<Mark>>;
    // 列出成绩
    async fn list_marks_with_pagination(&self, query: MarkListParams) -> Result<MarkListResponse>;
    // 更新成绩
    async fn update_mark(&self, id: i64, changes: MarkChanges) -> Result<Option<Mark>>;
    // 删除成绩
    async fn delete_mark(&self, id: i64) -> Result<bool>;

    /// 统计方法
    // 仪表盘统计，`since` 为本月起始时间戳
    async fn dashboard_stats(&self, since: i64) -> Result<DashboardStatsResponse>;
    // 数据库连通性检查
    async fn ping(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

/// 测试用的内存数据库存储，每次调用得到独立的数据库
#[cfg(test)]
pub(crate) async fn memory_storage() -> Arc<dyn Storage> {
    use crate::config::DatabaseConfig;

    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let storage = sea_orm_storage::SeaOrmStorage::connect(&config)
        .await
        .expect("in-memory storage");
    Arc::new(storage)
}
