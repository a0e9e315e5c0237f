use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 单页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;

// 列表查询参数（来自HTTP请求）
//
// 未提供 size 时返回过滤后的全部记录，作为单页返回。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct RecordListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

impl RecordListParams {
    /// 规范化后的页码（从 1 开始）
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1) as u64
    }

    /// 规范化后的每页条数，`None` 表示不分页
    pub fn page_size(&self) -> Option<u64> {
        self.size.map(|s| s.clamp(1, MAX_PAGE_SIZE) as u64)
    }

    /// 去除首尾空白后的搜索关键字，空串视为未提供
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    /// 未分页时的分页信息：全部记录作为一页
    pub fn single_page(total: u64) -> Self {
        Self {
            page: 1,
            page_size: total as i64,
            total: total as i64,
            total_pages: if total == 0 { 0 } else { 1 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_clamped() {
        let params = RecordListParams {
            page: Some(0),
            size: Some(1000),
            search: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), Some(100));

        let params = RecordListParams {
            page: None,
            size: Some(-3),
            search: None,
        };
        assert_eq!(params.page_size(), Some(1));
    }

    #[test]
    fn test_missing_size_means_unpaged() {
        assert_eq!(RecordListParams::default().page_size(), None);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let params = RecordListParams {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(params.search_term(), None);

        let params = RecordListParams {
            search: Some("  ann ".into()),
            ..Default::default()
        };
        assert_eq!(params.search_term(), Some("ann"));
    }

    #[test]
    fn test_single_page_info() {
        let empty = PaginationInfo::single_page(0);
        assert_eq!(empty.total_pages, 0);
        let some = PaginationInfo::single_page(12);
        assert_eq!(some.page_size, 12);
        assert_eq!(some.total_pages, 1);
    }
}
