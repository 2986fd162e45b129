use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Page metadata attached to paginated envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Compute page metadata for a result set of `total` rows.
///
/// Every paginated response goes through here so the page arithmetic lives in one place.
pub fn calculate_pagination(total: i64, page: i64, limit: i64) -> PaginationInfo {
    let total_pages = if limit > 0 {
        (total + limit - 1) / limit
    } else {
        0
    };

    PaginationInfo {
        page,
        limit,
        total,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
    }
}

/// Standard pagination query parameters for list endpoints.
///
/// Both fields are optional; list endpoints switch to the paginated envelope only when
/// at least one of them is supplied.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[validate(range(min = 1, message = "page must not be less than 1"))]
    #[param(minimum = 1)]
    pub page: Option<i64>,

    /// Number of items per page (default: 10, max: 100)
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
}

impl PaginationQuery {
    #[cfg(test)]
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// True when the caller asked for a specific page or page size
    pub fn is_requested(&self) -> bool {
        self.page.is_some() || self.limit.is_some()
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Rows to skip before the requested page, saturating for pages far past the end
    pub fn skip(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_pagination_middle_page() {
        let info = calculate_pagination(25, 2, 10);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next);
        assert!(info.has_prev);
    }

    #[test]
    fn test_calculate_pagination_single_page() {
        let info = calculate_pagination(5, 1, 10);
        assert_eq!(info.total_pages, 1);
        assert!(!info.has_next);
        assert!(!info.has_prev);
    }

    #[test]
    fn test_calculate_pagination_exact_multiple() {
        let info = calculate_pagination(30, 3, 10);
        assert_eq!(info.total_pages, 3);
        assert!(!info.has_next);
        assert!(info.has_prev);
    }

    #[test]
    fn test_calculate_pagination_empty_result() {
        let info = calculate_pagination(0, 1, 10);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next);
        assert!(!info.has_prev);
    }

    #[test]
    fn test_pagination_info_serializes_camel_case() {
        let value = serde_json::to_value(calculate_pagination(25, 2, 10)).unwrap();
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["hasNext"], true);
        assert_eq!(value["hasPrev"], true);
    }

    #[test]
    fn test_query_defaults() {
        let query = PaginationQuery::default();
        assert!(!query.is_requested());
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn test_query_skip() {
        assert_eq!(PaginationQuery::new(3, 20).skip(), 40);

        let only_page = PaginationQuery {
            page: Some(2),
            limit: None,
        };
        assert!(only_page.is_requested());
        assert_eq!(only_page.skip(), 10);
    }

    #[test]
    fn test_query_skip_saturates_on_huge_page() {
        assert_eq!(PaginationQuery::new(i64::MAX, 100).skip(), i64::MAX);
    }

    #[test]
    fn test_query_validation_bounds() {
        assert!(PaginationQuery::new(1, 100).validate().is_ok());
        assert!(PaginationQuery::new(0, 10).validate().is_err());
        assert!(PaginationQuery::new(1, 101).validate().is_err());
        assert!(PaginationQuery::new(1, 0).validate().is_err());
    }
}
