use serde::{Deserialize, Deserializer};
use ts_rs::TS;

// 创建科目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub subject_code: String,
    pub subject_name: String,
    pub description: Option<String>,
    pub credits: i32,
}

// 更新科目请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub subject_code: Option<String>,
    pub subject_name: Option<String>,
    /// 缺省表示不修改，显式 `null` 表示清空
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[ts(optional)]
    pub description: Option<Option<String>>,
    pub credits: Option<i32>,
}

// 区分字段缺省与显式 null
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_absent_null_and_value() {
        let absent: UpdateSubjectRequest = serde_json::from_str(r#"{"credits": 3}"#).unwrap();
        assert_eq!(absent.description, None);

        let cleared: UpdateSubjectRequest =
            serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: UpdateSubjectRequest =
            serde_json::from_str(r#"{"description": "Intro"}"#).unwrap();
        assert_eq!(set.description, Some(Some("Intro".to_string())));
    }
}
