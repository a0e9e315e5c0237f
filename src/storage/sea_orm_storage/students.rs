//! 学生存储操作

use super::{SeaOrmStorage, now_timestamp};
use crate::entity::marks::{Column as MarkColumn, Entity as Marks};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo, RecordListParams,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = now_timestamp();

        let model = ActiveModel {
            roll_no: Set(req.roll_no),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            date_of_birth: Set(req.date_of_birth),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("创建学生失败", e))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询学生失败", e))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出学生，提供 size 时分页
    pub async fn list_students_with_pagination_impl(
        &self,
        query: RecordListParams,
    ) -> Result<StudentListResponse> {
        let mut select = Students::find();

        // 搜索：学号、姓名、邮箱
        if let Some(search) = query.search_term() {
            select = select.filter(
                Condition::any()
                    .add(Column::RollNo.like(like_contains(search)))
                    .add(Column::FirstName.like(like_contains(search)))
                    .add(Column::LastName.like(like_contains(search)))
                    .add(Column::Email.like(like_contains(search))),
            );
        }

        select = select.order_by_asc(Column::Id);

        let Some(size) = query.page_size() else {
            let students = select
                .all(&self.db)
                .await
                .map_err(|e| RecordsError::from_db("查询学生列表失败", e))?;
            let pagination = PaginationInfo::single_page(students.len() as u64);
            return Ok(StudentListResponse {
                items: students.into_iter().map(|m| m.into_student()).collect(),
                pagination,
            });
        };

        let page = query.page();
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| RecordsError::from_db("查询学生总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| RecordsError::from_db("查询学生页数失败", e))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RecordsError::from_db("查询学生列表失败", e))?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新学生信息，只写入提供的字段
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_timestamp()),
            ..Default::default()
        };

        if let Some(roll_no) = update.roll_no {
            model.roll_no = Set(roll_no);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(date_of_birth);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("更新学生失败", e))?;

        self.get_student_by_id_impl(id).await
    }

    /// 删除学生
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("删除学生失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计学生名下的成绩数量
    pub async fn count_marks_for_student_impl(&self, student_id: i64) -> Result<u64> {
        Marks::find()
            .filter(MarkColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("统计学生成绩失败", e))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{
        RecordListParams,
        students::requests::{CreateStudentRequest, UpdateStudentRequest},
    };
    use crate::storage::memory_storage;
    use chrono::NaiveDate;

    fn ann() -> CreateStudentRequest {
        CreateStudentRequest {
            roll_no: "R1".into(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "a@x.com".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        }
    }

    #[actix_web::test]
    async fn test_student_round_trip() {
        let storage = memory_storage().await;
        let created = storage.create_student(ann()).await.unwrap();
        let fetched = storage.get_student_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.roll_no, "R1");
        assert_eq!(fetched.first_name, "Ann");
        assert_eq!(fetched.last_name, "Lee");
        assert_eq!(fetched.email, "a@x.com");
        assert_eq!(
            fetched.date_of_birth,
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
        );
    }

    #[actix_web::test]
    async fn test_duplicate_roll_no_is_constraint_violation() {
        let storage = memory_storage().await;
        storage.create_student(ann()).await.unwrap();

        let mut other = ann();
        other.email = "b@x.com".into();
        let err = storage.create_student(other).await.unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[actix_web::test]
    async fn test_list_search_and_pages() {
        let storage = memory_storage().await;
        assert!(
            storage
                .list_students_with_pagination(RecordListParams::default())
                .await
                .unwrap()
                .items
                .is_empty()
        );

        for (i, name) in ["Ann", "Bob", "Anna"].iter().enumerate() {
            let mut req = ann();
            req.roll_no = format!("R{i}");
            req.email = format!("s{i}@x.com");
            req.first_name = name.to_string();
            storage.create_student(req).await.unwrap();
        }

        let found = storage
            .list_students_with_pagination(RecordListParams {
                search: Some("ann".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.items.len(), 2);

        let paged = storage
            .list_students_with_pagination(RecordListParams {
                page: Some(2),
                size: Some(2),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.pagination.total, 3);
        assert_eq!(paged.pagination.total_pages, 2);
    }

    #[actix_web::test]
    async fn test_partial_update_and_delete() {
        let storage = memory_storage().await;
        let created = storage.create_student(ann()).await.unwrap();

        let updated = storage
            .update_student(
                created.id,
                UpdateStudentRequest {
                    last_name: Some("Park".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.last_name, "Park");
        assert_eq!(updated.first_name, "Ann");

        assert!(
            storage
                .update_student(999, UpdateStudentRequest::default())
                .await
                .unwrap()
                .is_none()
        );

        assert!(storage.delete_student(created.id).await.unwrap());
        assert!(!storage.delete_student(created.id).await.unwrap());
    }
}
