//! List query parameters for dashboard pages.
//!
//! Supports offset-based (`limit` + `offset`) and page-based (`limit` + `page`)
//! pagination. An explicit `offset` wins over `page`; without either the first
//! page is returned.
//!
//! `order_by` is a comma-separated list of column names, each optionally
//! prefixed with `-` for descending order: `?order_by=-created_at,email`.
//!
//! The default page size is not fixed here: callers pass the configured
//! `PAGINATION_MAX_SIZE`, so every method that needs a limit takes it.

use serde::{Deserialize, Deserializer, Serialize};

const MAX_LIMIT: i64 = 100;

/// Deserializes an optional string into an optional i64.
///
/// Query parameters submitted by HTML forms arrive as empty strings when left
/// blank; those are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Position of a rendered list page, handed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Total number of rows across all pages
    pub total: i64,
    /// Rows per page (the limit that was applied)
    pub limit: i64,
    pub offset: i64,
    /// Current page, 1-indexed
    pub page: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        let limit = limit.max(1);
        Self {
            total,
            limit,
            offset,
            page: (offset / limit).saturating_add(1),
            total_pages: page_total(total, limit),
            has_more: offset.saturating_add(limit) < total,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Number of pages needed to show `total` rows at `limit` per page.
pub fn page_total(total: i64, limit: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    let limit = limit.max(1);
    (total + limit - 1) / limit
}

/// Query parameters accepted by every list page.
///
/// # Example
///
/// ```ignore
/// // GET /admin/user/?limit=20&page=3
/// let params = PaginationParams {
///     limit: Some(20),
///     offset: None,
///     page: Some(3),
///     order_by: None,
/// };
///
/// assert_eq!(params.limit(25), 20);
/// assert_eq!(params.offset(25), 40); // (page - 1) * limit
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Rows to skip; takes precedence over `page`
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// Page number, 1-indexed; values below 1 mean the first page
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default)]
    pub order_by: Option<String>,
}

impl PaginationParams {
    /// Effective limit, clamped to [1, 100]; `default_limit` when absent.
    #[must_use]
    pub fn limit(&self, default_limit: i64) -> i64 {
        self.limit.unwrap_or(default_limit).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn offset(&self, default_limit: i64) -> i64 {
        match (self.offset, self.page) {
            (Some(offset), _) => offset.max(0),
            (None, Some(page)) => (page.max(1) - 1).saturating_mul(self.limit(default_limit)),
            (None, None) => 0,
        }
    }

    /// Column names requested by `order_by`, in order, blanks removed.
    #[must_use]
    pub fn order_by(&self) -> Vec<&str> {
        self.order_by
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn meta(&self, total: i64, default_limit: i64) -> PaginationMeta {
        PaginationMeta::new(total, self.limit(default_limit), self.offset(default_limit))
    }
}
