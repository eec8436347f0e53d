use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::serde::deserialize_optional_i64;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn from_params(params: &PaginationParams, total: i64) -> Self {
        let limit = params.limit();
        let offset = params.offset();
        Self {
            total,
            limit,
            offset,
            page: params.page(),
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

/// `page` wins over `offset` when both are given.
#[derive(Debug, Default, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        match self.page {
            Some(page) => (page.max(1) - 1).saturating_mul(self.limit()),
            None => self.offset.unwrap_or(0).max(0),
        }
    }

    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>, page: Option<i64>) -> PaginationParams {
        PaginationParams {
            limit,
            offset,
            page,
        }
    }

    #[test]
    fn defaults() {
        let p = PaginationParams::default();
        assert_eq!(p.limit(), DEFAULT_LIMIT);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.page(), None);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(params(Some(0), None, None).limit(), 1);
        assert_eq!(params(Some(-3), None, None).limit(), 1);
        assert_eq!(params(Some(500), None, None).limit(), MAX_LIMIT);
    }

    #[test]
    fn page_overrides_offset() {
        let p = params(Some(10), Some(7), Some(3));
        assert_eq!(p.offset(), 20);
        assert_eq!(p.page(), Some(3));
    }

    #[test]
    fn negative_offset_and_page_are_floored() {
        assert_eq!(params(None, Some(-10), None).offset(), 0);
        assert_eq!(params(Some(10), None, Some(-2)).offset(), 0);
    }

    #[test]
    fn huge_page_and_offset_saturate() {
        let p = params(Some(50), None, Some(i64::MAX));
        assert_eq!(p.offset(), i64::MAX);
        let meta = PaginationMeta::from_params(&p, 10);
        assert!(!meta.has_more);
        assert_eq!(meta.offset, i64::MAX);

        let p = params(Some(50), Some(i64::MAX), None);
        assert_eq!(p.offset(), i64::MAX);
        assert!(!PaginationMeta::from_params(&p, 10).has_more);
    }

    #[test]
    fn meta_reports_has_more() {
        let p = params(Some(10), None, Some(1));
        let meta = PaginationMeta::from_params(&p, 25);
        assert!(meta.has_more);
        assert_eq!(meta.page, Some(1));

        let p = params(Some(10), None, Some(3));
        assert!(!PaginationMeta::from_params(&p, 25).has_more);
    }

    #[test]
    fn meta_omits_page_when_offset_based() {
        let p = params(Some(5), Some(5), None);
        let json = serde_json::to_value(PaginationMeta::from_params(&p, 6)).unwrap();
        assert!(json.get("page").is_none());
        assert_eq!(json["offset"], 5);
        assert_eq!(json["hasMore"], false);
    }

    #[test]
    fn deserializes_query_strings_with_empty_values() {
        let p: PaginationParams =
            serde_json::from_str(r#"{"limit": "", "page": "2"}"#).unwrap();
        assert_eq!(p.limit, None);
        assert_eq!(p.page, Some(2));
    }
}
