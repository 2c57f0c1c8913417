//! List query parameters and filter expressions

use serde::Serialize;
use std::fmt;

/// Default page size for list queries
pub const DEFAULT_LIMIT: u32 = 100;

/// Default order: newest publication first
pub const DEFAULT_ORDERS: &str = "-publishedAt";

/// Query parameters for a list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            filters: None,
            orders: None,
        }
    }
}

/// Caller options for listing posts; unset fields take the defaults
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub filters: Option<String>,
    pub orders: Option<String>,
}

impl PostQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = Some(filters.into());
        self
    }

    pub fn orders(mut self, orders: impl Into<String>) -> Self {
        self.orders = Some(orders.into());
        self
    }

    /// Resolve into the query sent to the CMS
    ///
    /// A zero limit counts as unset, so it also falls back to the default.
    pub fn into_list_query(self) -> ListQuery {
        ListQuery {
            limit: self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
            offset: self.offset.unwrap_or(0),
            filters: self.filters.filter(|f| !f.is_empty()),
            orders: Some(
                self.orders
                    .filter(|o| !o.is_empty())
                    .unwrap_or_else(|| DEFAULT_ORDERS.to_string()),
            ),
        }
    }
}

/// A filter expression in microCMS syntax, e.g. `category[equals]news`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    pub fn equals(field: &str, value: &str) -> Self {
        Self(format!("{}[equals]{}", field, value))
    }

    pub fn not_equals(field: &str, value: &str) -> Self {
        Self(format!("{}[not_equals]{}", field, value))
    }

    pub fn contains(field: &str, value: &str) -> Self {
        Self(format!("{}[contains]{}", field, value))
    }

    /// Combine two conditions with `[and]`
    pub fn and(self, other: Filter) -> Self {
        Self(format!("{}[and]{}", self.0, other.0))
    }

    /// Combine two conditions with `[or]`
    pub fn or(self, other: Filter) -> Self {
        Self(format!("{}[or]{}", self.0, other.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        filter.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_query_defaults() {
        let query = PostQuery::new().into_list_query();
        assert_eq!(query.limit, 100);
        assert_eq!(query.offset, 0);
        assert_eq!(query.filters, None);
        assert_eq!(query.orders.as_deref(), Some("-publishedAt"));
    }

    #[test]
    fn test_zero_limit_uses_default() {
        let query = PostQuery::new().limit(0).offset(20).into_list_query();
        assert_eq!(query.limit, 100);
        assert_eq!(query.offset, 20);
    }

    #[test]
    fn test_filter_expressions() {
        assert_eq!(Filter::equals("id", "abc").as_str(), "id[equals]abc");
        assert_eq!(
            Filter::contains("tags", "rust")
                .and(Filter::equals("draft", "false"))
                .to_string(),
            "tags[contains]rust[and]draft[equals]false"
        );
        assert_eq!(
            Filter::not_equals("category", "news")
                .or(Filter::equals("id", "x"))
                .to_string(),
            "category[not_equals]news[or]id[equals]x"
        );
    }

    #[test]
    fn test_query_string_skips_missing_filters() {
        let query = PostQuery::new().limit(1).into_list_query();
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["limit"], 1);
        assert!(json.get("filters").is_none());
    }
}
