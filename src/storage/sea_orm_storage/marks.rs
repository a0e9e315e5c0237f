//! 成绩存储操作
//!
//! 所有读取都关联学生和科目表，返回带展示字段的成绩记录。

use super::{SeaOrmStorage, now_timestamp};
use crate::entity::marks::{ActiveModel, Column, Entity as Marks, Relation};
use crate::entity::students::Column as StudentColumn;
use crate::entity::subjects::Column as SubjectColumn;
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo,
    marks::{
        entities::{LetterGrade, Mark, MarkStudent, MarkSubject, percentage},
        requests::{MarkChanges, MarkListParams, NewMark},
        responses::MarkListResponse,
    },
};
use crate::utils::like_contains;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

// 成绩与学生、科目的连接查询结果
#[derive(Debug, FromQueryResult)]
struct MarkRow {
    id: i64,
    student_id: i64,
    subject_id: i64,
    marks_obtained: f64,
    max_marks: f64,
    exam_date: NaiveDate,
    semester: i32,
    created_at: i64,
    updated_at: i64,
    student_roll_no: String,
    student_first_name: String,
    student_last_name: String,
    subject_code: String,
    subject_name: String,
}

impl MarkRow {
    fn into_mark(self) -> Mark {
        let percentage = percentage(self.marks_obtained, self.max_marks);

        Mark {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            marks_obtained: self.marks_obtained,
            max_marks: self.max_marks,
            exam_date: self.exam_date,
            semester: self.semester,
            percentage,
            grade: LetterGrade::from_percentage(percentage),
            student: MarkStudent {
                roll_no: self.student_roll_no,
                first_name: self.student_first_name,
                last_name: self.student_last_name,
            },
            subject: MarkSubject {
                subject_code: self.subject_code,
                subject_name: self.subject_name,
            },
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}

/// 带学生和科目字段的成绩查询
fn enriched_select() -> Select<Marks> {
    Marks::find()
        .select_only()
        .columns([
            Column::Id,
            Column::StudentId,
            Column::SubjectId,
            Column::MarksObtained,
            Column::MaxMarks,
            Column::ExamDate,
            Column::Semester,
            Column::CreatedAt,
            Column::UpdatedAt,
        ])
        .column_as(StudentColumn::RollNo, "student_roll_no")
        .column_as(StudentColumn::FirstName, "student_first_name")
        .column_as(StudentColumn::LastName, "student_last_name")
        .column_as(SubjectColumn::SubjectCode, "subject_code")
        .column_as(SubjectColumn::SubjectName, "subject_name")
        .join(JoinType::InnerJoin, Relation::Student.def())
        .join(JoinType::InnerJoin, Relation::Subject.def())
}

impl SeaOrmStorage {
    /// 写入成绩并返回关联后的记录
    pub async fn create_mark_impl(&self, mark: NewMark) -> Result<Mark> {
        let now = now_timestamp();

        let model = ActiveModel {
            student_id: Set(mark.student_id),
            subject_id: Set(mark.subject_id),
            marks_obtained: Set(mark.marks_obtained),
            max_marks: Set(mark.max_marks),
            exam_date: Set(mark.exam_date),
            semester: Set(mark.semester),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("创建成绩失败", e))?;

        self.get_mark_by_id_impl(result.id).await?.ok_or_else(|| {
            RecordsError::database_operation(format!("新建成绩 {} 读取失败", result.id))
        })
    }

    /// 通过 ID 获取成绩
    pub async fn get_mark_by_id_impl(&self, id: i64) -> Result<Option<Mark>> {
        let row = enriched_select()
            .filter(Column::Id.eq(id))
            .into_model::<MarkRow>()
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询成绩失败", e))?;

        Ok(row.map(MarkRow::into_mark))
    }

    /// 按 (学生, 科目, 学期) 查找成绩
    pub async fn find_mark_by_student_subject_semester_impl(
        &self,
        student_id: i64,
        subject_id: i64,
        semester: i32,
    ) -> Result<Option<Mark>> {
        let row = enriched_select()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::Semester.eq(semester))
            .into_model::<MarkRow>()
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询成绩失败", e))?;

        Ok(row.map(MarkRow::into_mark))
    }

    /// 列出成绩
    pub async fn list_marks_with_pagination_impl(
        &self,
        query: MarkListParams,
    ) -> Result<MarkListResponse> {
        let params = query.list_params();
        let mut select = enriched_select();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        // 搜索：学生学号和姓名、科目代码和名称
        if let Some(search) = params.search_term() {
            select = select.filter(
                Condition::any()
                    .add(StudentColumn::RollNo.like(like_contains(search)))
                    .add(StudentColumn::FirstName.like(like_contains(search)))
                    .add(StudentColumn::LastName.like(like_contains(search)))
                    .add(SubjectColumn::SubjectCode.like(like_contains(search)))
                    .add(SubjectColumn::SubjectName.like(like_contains(search))),
            );
        }

        let select = select.order_by_asc(Column::Id).into_model::<MarkRow>();

        let Some(size) = params.page_size() else {
            let rows = select
                .all(&self.db)
                .await
                .map_err(|e| RecordsError::from_db("查询成绩列表失败", e))?;
            let pagination = PaginationInfo::single_page(rows.len() as u64);
            return Ok(MarkListResponse {
                items: rows.into_iter().map(MarkRow::into_mark).collect(),
                pagination,
            });
        };

        let page = params.page();
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| RecordsError::from_db("查询成绩总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| RecordsError::from_db("查询成绩页数失败", e))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RecordsError::from_db("查询成绩列表失败", e))?;

        Ok(MarkListResponse {
            items: rows.into_iter().map(MarkRow::into_mark).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新成绩，学期冲突由唯一索引报告为约束冲突
    pub async fn update_mark_impl(&self, id: i64, changes: MarkChanges) -> Result<Option<Mark>> {
        if Marks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询成绩失败", e))?
            .is_none()
        {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_timestamp()),
            ..Default::default()
        };

        if let Some(marks_obtained) = changes.marks_obtained {
            model.marks_obtained = Set(marks_obtained);
        }
        if let Some(max_marks) = changes.max_marks {
            model.max_marks = Set(max_marks);
        }
        if let Some(exam_date) = changes.exam_date {
            model.exam_date = Set(exam_date);
        }
        if let Some(semester) = changes.semester {
            model.semester = Set(semester);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("更新成绩失败", e))?;

        self.get_mark_by_id_impl(id).await
    }

    /// 删除成绩
    pub async fn delete_mark_impl(&self, id: i64) -> Result<bool> {
        let result = Marks::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("删除成绩失败", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::marks::{
        entities::LetterGrade,
        requests::{MarkChanges, MarkListParams, NewMark},
    };
    use crate::models::{
        students::requests::CreateStudentRequest, subjects::requests::CreateSubjectRequest,
    };
    use crate::storage::{Storage, memory_storage};
    use chrono::NaiveDate;
    use std::sync::Arc;

    async fn seed(storage: &Arc<dyn Storage>) -> (i64, i64) {
        let student = storage
            .create_student(CreateStudentRequest {
                roll_no: "R1".into(),
                first_name: "Ann".into(),
                last_name: "Lee".into(),
                email: "a@x.com".into(),
                date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            })
            .await
            .unwrap();
        let subject = storage
            .create_subject(CreateSubjectRequest {
                subject_code: "MATH101".into(),
                subject_name: "Calculus".into(),
                description: None,
                credits: 4,
            })
            .await
            .unwrap();
        (student.id, subject.id)
    }

    fn new_mark(student_id: i64, subject_id: i64, semester: i32) -> NewMark {
        NewMark {
            student_id,
            subject_id,
            marks_obtained: 85.0,
            max_marks: 100.0,
            exam_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            semester,
        }
    }

    #[actix_web::test]
    async fn test_created_mark_is_enriched() {
        let storage = memory_storage().await;
        let (student_id, subject_id) = seed(&storage).await;

        let mark = storage
            .create_mark(new_mark(student_id, subject_id, 1))
            .await
            .unwrap();
        assert_eq!(mark.percentage, 85.0);
        assert_eq!(mark.grade, LetterGrade::A);
        assert_eq!(mark.student.roll_no, "R1");
        assert_eq!(mark.subject.subject_code, "MATH101");

        let found = storage
            .find_mark_by_student_subject_semester(student_id, subject_id, 1)
            .await
            .unwrap();
        assert_eq!(found.map(|m| m.id), Some(mark.id));
    }

    #[actix_web::test]
    async fn test_unique_triple_is_enforced_by_store() {
        let storage = memory_storage().await;
        let (student_id, subject_id) = seed(&storage).await;

        storage
            .create_mark(new_mark(student_id, subject_id, 1))
            .await
            .unwrap();
        let err = storage
            .create_mark(new_mark(student_id, subject_id, 1))
            .await
            .unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[actix_web::test]
    async fn test_unknown_student_is_rejected_by_foreign_key() {
        let storage = memory_storage().await;
        let (_, subject_id) = seed(&storage).await;

        let err = storage
            .create_mark(new_mark(999, subject_id, 1))
            .await
            .unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[actix_web::test]
    async fn test_filters_and_update() {
        let storage = memory_storage().await;
        let (student_id, subject_id) = seed(&storage).await;

        let first = storage
            .create_mark(new_mark(student_id, subject_id, 1))
            .await
            .unwrap();
        storage
            .create_mark(new_mark(student_id, subject_id, 2))
            .await
            .unwrap();

        let semester_two = storage
            .list_marks_with_pagination(MarkListParams {
                semester: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(semester_two.items.len(), 1);

        let by_name = storage
            .list_marks_with_pagination(MarkListParams {
                search: Some("calc".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_name.pagination.total, 2);

        let updated = storage
            .update_mark(
                first.id,
                MarkChanges {
                    marks_obtained: Some(95.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.grade, LetterGrade::APlus);

        // 改到已占用的学期
        let err = storage
            .update_mark(
                first.id,
                MarkChanges {
                    semester: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[actix_web::test]
    async fn test_student_with_marks_cannot_be_deleted() {
        let storage = memory_storage().await;
        let (student_id, subject_id) = seed(&storage).await;
        storage
            .create_mark(new_mark(student_id, subject_id, 1))
            .await
            .unwrap();

        assert_eq!(storage.count_marks_for_student(student_id).await.unwrap(), 1);
        assert!(storage.delete_student(student_id).await.is_err());
        assert_eq!(storage.count_marks_for_subject(subject_id).await.unwrap(), 1);
    }
}
