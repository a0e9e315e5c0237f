//! 成绩校验
//!
//! 写入前依次检查：必填字段、分数范围、考试日期、学期、重复记录、学生和科目是否存在。
//! 每一项失败都对应一个 `MarkRejection`，由服务层转换为响应。

use std::sync::Arc;

use actix_web::HttpResponse;
use chrono::{DateTime, NaiveDate};
use futures_util::future::try_join;

use crate::errors::RecordsError;
use crate::models::{
    ErrorCode, ErrorResponse,
    marks::{
        entities::Mark,
        requests::{CreateMarkRequest, MarkChanges, NewMark, UpdateMarkRequest},
    },
};
use crate::storage::Storage;

pub const MIN_SEMESTER: i32 = 1;
pub const MAX_SEMESTER: i32 = 8;

/// 成绩校验失败的原因
#[derive(Debug)]
pub enum MarkRejection {
    MissingField(&'static str),
    InvalidRange(String),
    InvalidDate(String),
    InvalidSemester(i64),
    DuplicateMark(Box<Mark>),
    StudentNotFound(i64),
    SubjectNotFound(i64),
    NotFound(i64),
    Storage(RecordsError),
}

impl From<RecordsError> for MarkRejection {
    fn from(err: RecordsError) -> Self {
        MarkRejection::Storage(err)
    }
}

impl MarkRejection {
    pub fn code(&self) -> ErrorCode {
        match self {
            MarkRejection::MissingField(_) => ErrorCode::MissingField,
            MarkRejection::InvalidRange(_) => ErrorCode::InvalidRange,
            MarkRejection::InvalidDate(_) => ErrorCode::InvalidDate,
            MarkRejection::InvalidSemester(_) => ErrorCode::InvalidSemester,
            MarkRejection::DuplicateMark(_) => ErrorCode::DuplicateMark,
            MarkRejection::StudentNotFound(_) => ErrorCode::StudentNotFound,
            MarkRejection::SubjectNotFound(_) => ErrorCode::SubjectNotFound,
            MarkRejection::NotFound(_) => ErrorCode::NotFound,
            MarkRejection::Storage(e) if e.is_constraint_violation() => {
                ErrorCode::ConstraintViolation
            }
            MarkRejection::Storage(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MarkRejection::MissingField(_) => "Missing required fields",
            MarkRejection::InvalidRange(_) => "Invalid marks range",
            MarkRejection::InvalidDate(_) => "Invalid exam date format",
            MarkRejection::InvalidSemester(_) => "Invalid semester",
            MarkRejection::DuplicateMark(_) => {
                "Mark already exists for this student and subject in this semester"
            }
            MarkRejection::StudentNotFound(_) => "Student not found",
            MarkRejection::SubjectNotFound(_) => "Subject not found",
            MarkRejection::NotFound(_) => "Mark not found",
            MarkRejection::Storage(e) if e.is_constraint_violation() => {
                "Mark conflicts with an existing record"
            }
            MarkRejection::Storage(_) => "Failed to save mark",
        }
    }

    pub fn details(&self) -> String {
        match self {
            MarkRejection::MissingField(field) => format!("{field} is required"),
            MarkRejection::InvalidRange(detail) => detail.clone(),
            MarkRejection::InvalidDate(raw) => {
                format!("'{raw}' is not a valid date, expected YYYY-MM-DD")
            }
            MarkRejection::InvalidSemester(_) => {
                format!("Semester should be between {MIN_SEMESTER} and {MAX_SEMESTER}")
            }
            MarkRejection::DuplicateMark(mark) => format!("Existing mark id: {}", mark.id),
            MarkRejection::StudentNotFound(id) => format!("No student with id {id}"),
            MarkRejection::SubjectNotFound(id) => format!("No subject with id {id}"),
            MarkRejection::NotFound(id) => format!("No mark with id {id}"),
            MarkRejection::Storage(e) => e.message().to_string(),
        }
    }

    pub fn into_response(self) -> HttpResponse {
        let code = self.code();
        let message = self.message();
        let details = self.details();

        match self {
            MarkRejection::DuplicateMark(mark) => HttpResponse::BadRequest()
                .json(ErrorResponse::with_data(code, *mark, message).details(details)),
            MarkRejection::StudentNotFound(_)
            | MarkRejection::SubjectNotFound(_)
            | MarkRejection::NotFound(_) => HttpResponse::NotFound()
                .json(ErrorResponse::new(code, message).details(details)),
            MarkRejection::Storage(ref e) if !e.is_constraint_violation() => {
                HttpResponse::InternalServerError()
                    .json(ErrorResponse::new(code, message).details(details))
            }
            _ => {
                HttpResponse::BadRequest().json(ErrorResponse::new(code, message).details(details))
            }
        }
    }
}

/// 分数范围：满分为正，得分在 [0, 满分] 内
pub fn check_marks_range(marks_obtained: f64, max_marks: f64) -> Result<(), MarkRejection> {
    if !(max_marks > 0.0) {
        return Err(MarkRejection::InvalidRange(
            "Max marks should be greater than 0".to_string(),
        ));
    }
    if !(0.0..=max_marks).contains(&marks_obtained) {
        return Err(MarkRejection::InvalidRange(
            "Marks obtained should be between 0 and max marks".to_string(),
        ));
    }
    Ok(())
}

/// 解析考试日期，接受 `YYYY-MM-DD` 或 RFC 3339 时间（取日期部分）
pub fn parse_exam_date(raw: &str) -> Result<NaiveDate, MarkRejection> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| MarkRejection::InvalidDate(raw.to_string()))
}

/// 学期按 i64 接收，范围检查通过后才收窄为 i32
pub fn check_semester(semester: i64) -> Result<i32, MarkRejection> {
    if !(i64::from(MIN_SEMESTER)..=i64::from(MAX_SEMESTER)).contains(&semester) {
        return Err(MarkRejection::InvalidSemester(semester));
    }
    i32::try_from(semester).map_err(|_| MarkRejection::InvalidSemester(semester))
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, MarkRejection> {
    value.ok_or(MarkRejection::MissingField(field))
}

/// 校验新成绩，通过后返回可直接写入的 `NewMark`
pub async fn validate_mark_create(
    storage: &Arc<dyn Storage>,
    input: CreateMarkRequest,
) -> Result<NewMark, MarkRejection> {
    let student_id = required(input.student_id, "studentId")?;
    let subject_id = required(input.subject_id, "subjectId")?;
    let marks_obtained = required(input.marks_obtained, "marksObtained")?;
    let max_marks = required(input.max_marks, "maxMarks")?;
    let exam_date = required(
        input.exam_date.filter(|d| !d.trim().is_empty()),
        "examDate",
    )?;
    let semester = required(input.semester, "semester")?;

    check_marks_range(marks_obtained, max_marks)?;
    let exam_date = parse_exam_date(&exam_date)?;
    let semester = check_semester(semester)?;

    if let Some(existing) = storage
        .find_mark_by_student_subject_semester(student_id, subject_id, semester)
        .await?
    {
        return Err(MarkRejection::DuplicateMark(Box::new(existing)));
    }

    let (student, subject) = try_join(
        storage.get_student_by_id(student_id),
        storage.get_subject_by_id(subject_id),
    )
    .await?;

    if student.is_none() {
        return Err(MarkRejection::StudentNotFound(student_id));
    }
    if subject.is_none() {
        return Err(MarkRejection::SubjectNotFound(subject_id));
    }

    Ok(NewMark {
        student_id,
        subject_id,
        marks_obtained,
        max_marks,
        exam_date,
        semester,
    })
}

/// 校验成绩修改，范围检查使用提供值覆盖后的分数
pub async fn validate_mark_update(
    storage: &Arc<dyn Storage>,
    id: i64,
    input: UpdateMarkRequest,
) -> Result<(Mark, MarkChanges), MarkRejection> {
    let existing = storage
        .get_mark_by_id(id)
        .await?
        .ok_or(MarkRejection::NotFound(id))?;

    if input.marks_obtained.is_some() || input.max_marks.is_some() {
        check_marks_range(
            input.marks_obtained.unwrap_or(existing.marks_obtained),
            input.max_marks.unwrap_or(existing.max_marks),
        )?;
    }

    let exam_date = input
        .exam_date
        .as_deref()
        .map(parse_exam_date)
        .transpose()?;

    let semester = input.semester.map(check_semester).transpose()?;

    let changes = MarkChanges {
        marks_obtained: input.marks_obtained,
        max_marks: input.max_marks,
        exam_date,
        semester,
    };

    Ok((existing, changes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        students::requests::CreateStudentRequest, subjects::requests::CreateSubjectRequest,
    };
    use crate::storage::memory_storage;

    fn full_request(student_id: i64, subject_id: i64) -> CreateMarkRequest {
        CreateMarkRequest {
            student_id: Some(student_id),
            subject_id: Some(subject_id),
            marks_obtained: Some(85.0),
            max_marks: Some(100.0),
            exam_date: Some("2024-05-20".into()),
            semester: Some(1),
        }
    }

    async fn seeded() -> (Arc<dyn Storage>, i64, i64) {
        let storage = memory_storage().await;
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
        (storage, student.id, subject.id)
    }

    #[test]
    fn test_marks_range() {
        assert!(check_marks_range(0.0, 100.0).is_ok());
        assert!(check_marks_range(100.0, 100.0).is_ok());
        assert!(matches!(
            check_marks_range(-1.0, 100.0),
            Err(MarkRejection::InvalidRange(_))
        ));
        assert!(matches!(
            check_marks_range(101.0, 100.0),
            Err(MarkRejection::InvalidRange(_))
        ));
        assert!(matches!(
            check_marks_range(0.0, 0.0),
            Err(MarkRejection::InvalidRange(_))
        ));
    }

    #[test]
    fn test_exam_date_formats() {
        assert_eq!(
            parse_exam_date("2024-05-20").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
        );
        assert_eq!(
            parse_exam_date("2024-05-20T09:30:00Z").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
        );
        assert!(matches!(
            parse_exam_date("2024-02-30"),
            Err(MarkRejection::InvalidDate(_))
        ));
        assert!(matches!(
            parse_exam_date("yesterday"),
            Err(MarkRejection::InvalidDate(_))
        ));
    }

    #[test]
    fn test_semester_bounds() {
        assert!(matches!(check_semester(1), Ok(1)));
        assert!(matches!(check_semester(8), Ok(8)));
        assert!(matches!(
            check_semester(0),
            Err(MarkRejection::InvalidSemester(0))
        ));
        assert!(matches!(
            check_semester(9),
            Err(MarkRejection::InvalidSemester(9))
        ));
        assert!(matches!(
            check_semester(3_000_000_000),
            Err(MarkRejection::InvalidSemester(3_000_000_000))
        ));
        assert!(matches!(
            check_semester(-4_294_967_295),
            Err(MarkRejection::InvalidSemester(-4_294_967_295))
        ));
    }

    #[actix_web::test]
    async fn test_missing_field_is_named() {
        let storage = memory_storage().await;
        let mut req = full_request(1, 1);
        req.max_marks = None;
        let err = validate_mark_create(&storage, req).await.unwrap_err();
        assert!(matches!(err, MarkRejection::MissingField("maxMarks")));

        // 0 分是有效值
        let mut req = full_request(1, 1);
        req.marks_obtained = Some(0.0);
        req.exam_date = Some("  ".into());
        let err = validate_mark_create(&storage, req).await.unwrap_err();
        assert!(matches!(err, MarkRejection::MissingField("examDate")));
    }

    #[actix_web::test]
    async fn test_range_is_checked_before_existence() {
        let storage = memory_storage().await;
        let mut req = full_request(999, 999);
        req.marks_obtained = Some(120.0);
        let err = validate_mark_create(&storage, req).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRange);
    }

    #[actix_web::test]
    async fn test_missing_student_reported_first() {
        let storage = memory_storage().await;
        let err = validate_mark_create(&storage, full_request(999, 999))
            .await
            .unwrap_err();
        assert!(matches!(err, MarkRejection::StudentNotFound(999)));

        let (storage, student_id, _) = seeded().await;
        let err = validate_mark_create(&storage, full_request(student_id, 999))
            .await
            .unwrap_err();
        assert!(matches!(err, MarkRejection::SubjectNotFound(999)));
    }

    #[actix_web::test]
    async fn test_duplicate_returns_existing_mark() {
        let (storage, student_id, subject_id) = seeded().await;
        let new_mark = validate_mark_create(&storage, full_request(student_id, subject_id))
            .await
            .unwrap();
        let original = storage.create_mark(new_mark).await.unwrap();

        let err = validate_mark_create(&storage, full_request(student_id, subject_id))
            .await
            .unwrap_err();
        match err {
            MarkRejection::DuplicateMark(existing) => assert_eq!(existing.id, original.id),
            other => panic!("expected duplicate, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn test_update_merges_range_with_stored_values() {
        let (storage, student_id, subject_id) = seeded().await;
        let new_mark = validate_mark_create(&storage, full_request(student_id, subject_id))
            .await
            .unwrap();
        let mark = storage.create_mark(new_mark).await.unwrap();

        // 85 分不能超过新的满分 50
        let err = validate_mark_update(
            &storage,
            mark.id,
            UpdateMarkRequest {
                max_marks: Some(50.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRange);

        let (_, changes) = validate_mark_update(
            &storage,
            mark.id,
            UpdateMarkRequest {
                exam_date: Some("2024-06-01".into()),
                semester: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(changes.exam_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(changes.semester, Some(2));

        let err = validate_mark_update(&storage, 999, UpdateMarkRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MarkRejection::NotFound(999)));
    }
}
