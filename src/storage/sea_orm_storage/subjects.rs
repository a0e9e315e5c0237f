//! 科目存储操作

use super::{SeaOrmStorage, now_timestamp};
use crate::entity::marks::{Column as MarkColumn, Entity as Marks};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo, RecordListParams,
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = now_timestamp();

        let model = ActiveModel {
            subject_code: Set(req.subject_code),
            subject_name: Set(req.subject_name),
            description: Set(req.description),
            credits: Set(req.credits),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("创建科目失败", e))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询科目失败", e))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 列出科目
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: RecordListParams,
    ) -> Result<SubjectListResponse> {
        let mut select = Subjects::find();

        // 搜索：科目代码、名称
        if let Some(search) = query.search_term() {
            select = select.filter(
                Condition::any()
                    .add(Column::SubjectCode.like(like_contains(search)))
                    .add(Column::SubjectName.like(like_contains(search))),
            );
        }

        select = select.order_by_asc(Column::Id);

        let Some(size) = query.page_size() else {
            let subjects = select
                .all(&self.db)
                .await
                .map_err(|e| RecordsError::from_db("查询科目列表失败", e))?;
            let pagination = PaginationInfo::single_page(subjects.len() as u64);
            return Ok(SubjectListResponse {
                items: subjects.into_iter().map(|m| m.into_subject()).collect(),
                pagination,
            });
        };

        let page = query.page();
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| RecordsError::from_db("查询科目总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| RecordsError::from_db("查询科目页数失败", e))?;

        let subjects = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RecordsError::from_db("查询科目列表失败", e))?;

        Ok(SubjectListResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新科目信息
    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_timestamp()),
            ..Default::default()
        };

        if let Some(subject_code) = update.subject_code {
            model.subject_code = Set(subject_code);
        }
        if let Some(subject_name) = update.subject_name {
            model.subject_name = Set(subject_name);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("更新科目失败", e))?;

        self.get_subject_by_id_impl(id).await
    }

    /// 删除科目
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("删除科目失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计科目下的成绩数量
    pub async fn count_marks_for_subject_impl(&self, subject_id: i64) -> Result<u64> {
        Marks::find()
            .filter(MarkColumn::SubjectId.eq(subject_id))
            .count(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("统计科目成绩失败", e))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{
        RecordListParams,
        subjects::requests::{CreateSubjectRequest, UpdateSubjectRequest},
    };
    use crate::storage::memory_storage;

    fn math() -> CreateSubjectRequest {
        CreateSubjectRequest {
            subject_code: "MATH101".into(),
            subject_name: "Calculus".into(),
            description: None,
            credits: 4,
        }
    }

    #[actix_web::test]
    async fn test_duplicate_code_is_constraint_violation() {
        let storage = memory_storage().await;
        storage.create_subject(math()).await.unwrap();

        let err = storage.create_subject(math()).await.unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[actix_web::test]
    async fn test_search_matches_code_and_name() {
        let storage = memory_storage().await;
        storage.create_subject(math()).await.unwrap();
        storage
            .create_subject(CreateSubjectRequest {
                subject_code: "PHY101".into(),
                subject_name: "Mechanics".into(),
                description: Some("Intro".into()),
                credits: 3,
            })
            .await
            .unwrap();

        let by_code = storage
            .list_subjects_with_pagination(RecordListParams {
                search: Some("phy".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_code.items.len(), 1);
        assert_eq!(by_code.items[0].subject_code, "PHY101");

        // 通配符按字面匹配
        let literal = storage
            .list_subjects_with_pagination(RecordListParams {
                search: Some("%".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(literal.items.is_empty());
    }

    #[actix_web::test]
    async fn test_update_description() {
        let storage = memory_storage().await;
        let created = storage.create_subject(math()).await.unwrap();

        let updated = storage
            .update_subject(
                created.id,
                UpdateSubjectRequest {
                    description: Some(Some("Limits and derivatives".into())),
                    credits: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description.as_deref(), Some("Limits and derivatives"));
        assert_eq!(updated.credits, 5);
        assert_eq!(updated.subject_name, "Calculus");
    }

    #[actix_web::test]
    async fn test_update_clears_description() {
        let storage = memory_storage().await;
        let created = storage
            .create_subject(CreateSubjectRequest {
                description: Some("Intro".into()),
                ..math()
            })
            .await
            .unwrap();

        // 未提供 description 时保持原值
        let kept = storage
            .update_subject(
                created.id,
                UpdateSubjectRequest {
                    credits: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.description.as_deref(), Some("Intro"));

        let cleared = storage
            .update_subject(
                created.id,
                UpdateSubjectRequest {
                    description: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.description, None);
        assert_eq!(cleared.credits, 5);
    }
}
