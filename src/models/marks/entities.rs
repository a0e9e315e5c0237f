use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 字母等级，由百分比按阶梯划分，仅在读取时计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            LetterGrade::APlus
        } else if percentage >= 80.0 {
            LetterGrade::A
        } else if percentage >= 70.0 {
            LetterGrade::B
        } else if percentage >= 60.0 {
            LetterGrade::C
        } else if percentage >= 50.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 得分百分比，保留两位小数；满分非正数时记为 0
pub fn percentage(marks_obtained: f64, max_marks: f64) -> f64 {
    if max_marks <= 0.0 {
        return 0.0;
    }
    (marks_obtained / max_marks * 100.0 * 100.0).round() / 100.0
}

// 成绩所属学生的展示字段
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct MarkStudent {
    pub roll_no: String,
    pub first_name: String,
    pub last_name: String,
}

// 成绩所属科目的展示字段
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct MarkSubject {
    pub subject_code: String,
    pub subject_name: String,
}

// 成绩记录，读取时关联学生和科目信息，并附带百分比和等级
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct Mark {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub exam_date: chrono::NaiveDate,
    pub semester: i32,
    pub percentage: f64,
    pub grade: LetterGrade,
    pub student: MarkStudent,
    pub subject: MarkSubject,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_steps() {
        assert_eq!(LetterGrade::from_percentage(100.0), LetterGrade::APlus);
        assert_eq!(LetterGrade::from_percentage(90.0), LetterGrade::APlus);
        assert_eq!(LetterGrade::from_percentage(89.99), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(80.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(70.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_percentage(60.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_percentage(50.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_percentage(49.99), LetterGrade::F);
        assert_eq!(LetterGrade::from_percentage(0.0), LetterGrade::F);
    }

    #[test]
    fn test_percentage_and_grade_for_85_of_100() {
        let p = percentage(85.0, 100.0);
        assert_eq!(p, 85.0);
        assert_eq!(LetterGrade::from_percentage(p).as_str(), "A");
    }

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(1.0, 3.0), 33.33);
        assert_eq!(percentage(2.0, 3.0), 66.67);
        assert_eq!(percentage(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_grade_serializes_as_letter() {
        assert_eq!(
            serde_json::to_string(&LetterGrade::APlus).unwrap(),
            "\"A+\""
        );
        assert_eq!(serde_json::to_string(&LetterGrade::F).unwrap(), "\"F\"");
    }
}
