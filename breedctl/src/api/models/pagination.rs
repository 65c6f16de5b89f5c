//! Pagination for list query parameters.
//!
//! Values that are missing, non-numeric or out of range fall back to their defaults instead of
//! rejecting the request.

use serde::Deserialize;
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Default number of items to return per page.
pub const DEFAULT_LIMIT: i64 = crate::db::query::DEFAULT_LIMIT;

/// Offset-based pagination parameters.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct Pagination {
    /// Maximum number of items to return (default: 50)
    #[param(default = 50, minimum = 1)]
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    pub limit: Option<i64>,

    /// Number of items to skip (default: 0)
    #[param(default = 0, minimum = 0)]
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    pub offset: Option<i64>,
}

impl Pagination {
    /// Get the limit, using DEFAULT_LIMIT when absent or not positive.
    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit.filter(|limit| *limit > 0).unwrap_or(DEFAULT_LIMIT)
    }

    /// Get the offset, using 0 when absent or negative.
    #[inline]
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// Get both limit and offset as a tuple, useful for destructuring.
    #[inline]
    pub fn params(&self) -> (i64, i64) {
        (self.limit(), self.offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let p = Pagination::default();
        assert_eq!(p.limit(), DEFAULT_LIMIT);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_non_positive_limit_uses_default() {
        let p = Pagination {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(p.limit(), DEFAULT_LIMIT);

        let p = Pagination {
            limit: Some(-5),
            offset: None,
        };
        assert_eq!(p.limit(), DEFAULT_LIMIT);

        // No upper clamp
        let p = Pagination {
            limit: Some(1000),
            offset: None,
        };
        assert_eq!(p.limit(), 1000);
    }

    #[test]
    fn test_negative_offset_is_zero() {
        let p = Pagination {
            limit: None,
            offset: Some(-10),
        };
        assert_eq!(p.offset(), 0);

        let p = Pagination {
            limit: Some(5),
            offset: Some(100),
        };
        assert_eq!(p.params(), (5, 100));
    }

    fn parse(uri: &str) -> Pagination {
        let uri: axum::http::Uri = uri.parse().unwrap();
        let axum::extract::Query(pagination) = axum::extract::Query::<Pagination>::try_from_uri(&uri).unwrap();
        pagination
    }

    #[test]
    fn test_query_string_parsing() {
        assert_eq!(parse("/breeds?limit=10&offset=3").params(), (10, 3));
        assert_eq!(parse("/breeds?limit=ten&offset=-").params(), (DEFAULT_LIMIT, 0));
        assert_eq!(parse("/breeds").params(), (DEFAULT_LIMIT, 0));
    }
}
