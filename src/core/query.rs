//! Query requests, responses and pagination utilities

use crate::core::filter::{FilterSet, FilterValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort key and direction.
///
/// A `None` key keeps insertion order. The key `relevance` ranks records by
/// how many searchable fields contain the active search text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Sort key for search relevance
    pub const RELEVANCE: &'static str = "relevance";

    /// Keep insertion order
    pub fn insertion() -> Self {
        Self::default()
    }

    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Desc,
        }
    }

    /// Parse a sort expression
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    ///
    /// An empty expression or unknown direction keeps insertion order.
    pub fn parse(expr: &str) -> Self {
        let expr = expr.trim();
        if expr.is_empty() {
            return Self::insertion();
        }

        match expr.split_once(':') {
            None => Self::asc(expr),
            Some((key, "asc")) if !key.is_empty() => Self::asc(key),
            Some((key, "desc")) if !key.is_empty() => Self::desc(key),
            Some(_) => Self::insertion(),
        }
    }
}

/// A page window over the filtered and sorted sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page index (starts at 0)
    pub index: usize,

    /// Items per page; 0 disables paging
    pub size: usize,
}

impl PageRequest {
    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }

    /// A single page holding everything
    pub fn all() -> Self {
        Self { index: 0, size: 0 }
    }

    /// Offset of the first item of this page
    pub fn offset(&self) -> usize {
        self.index.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::all()
    }
}

/// Query request consumed by the query engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub filters: FilterSet,
    #[serde(default)]
    pub sort: SortSpec,
    #[serde(default)]
    pub page: PageRequest,
}

impl QueryRequest {
    pub fn new(filters: FilterSet, sort: SortSpec, page: PageRequest) -> Self {
        Self {
            filters,
            sort,
            page,
        }
    }

    /// Everything, in insertion order
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}

/// Query response produced by the query engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse<T> {
    /// The records of the requested page
    pub items: Vec<T>,

    /// Number of records matching the filters, before pagination
    pub total_count: usize,
}

impl<T> QueryResponse<T> {
    /// Number of pages of `size` needed to show every match
    pub fn page_count(&self, size: usize) -> usize {
        if size == 0 {
            return usize::from(self.total_count > 0);
        }
        self.total_count.div_ceil(size)
    }
}

/// Query parameters for pagination and filtering
///
/// Extracted from URL query strings. All parameters have sensible defaults.
///
/// # Example
/// ```text
/// GET /jobs?page=2&limit=10
/// GET /jobs?q=roofer&filter={"status": "open"}
/// GET /jobs?filter={"salary_min>=": 40000, "skills": ["Framing"]}&sort=posted_at:desc
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page; the kind's page size when absent
    pub limit: Option<usize>,

    /// Filters as a JSON object, see [`FilterSet::from_json`]
    pub filter: Option<String>,

    /// Free-text search
    pub q: Option<String>,

    /// Sort expression, see [`SortSpec::parse`]
    pub sort: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            filter: None,
            q: None,
            sort: None,
        }
    }
}

/// Items per page when the caller does not say
pub const DEFAULT_LIMIT: usize = 20;

/// Upper bound on items per page
pub const MAX_LIMIT: usize = 100;

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit (or `default_limit`), clamped to `[1, max_limit]`
    pub fn limit(&self, default_limit: usize, max_limit: usize) -> usize {
        self.limit
            .unwrap_or(default_limit)
            .clamp(1, max_limit.max(1))
    }

    /// Parse filter JSON string into Value; unparsable JSON is ignored
    pub fn filter_value(&self) -> Option<Value> {
        self.filter
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok())
    }

    /// Convert into an engine request
    pub fn to_request(&self, default_limit: usize, max_limit: usize) -> QueryRequest {
        let mut filters = self
            .filter_value()
            .map(|v| FilterSet::from_json(&v))
            .unwrap_or_default();
        if let Some(q) = &self.q {
            filters = filters.with_filter("q", FilterValue::Search(q.clone()));
        }

        QueryRequest {
            filters,
            sort: self.sort.as_deref().map(SortSpec::parse).unwrap_or_default(),
            page: PageRequest::new(self.page() - 1, self.limit(default_limit, max_limit)),
        }
    }
}

/// Paginated response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

impl<T> PaginatedResponse<T> {
    /// Wrap an engine response for the 1-based page it answers
    pub fn from_response(response: QueryResponse<T>, page: usize, limit: usize) -> Self {
        Self {
            pagination: PaginationMeta::new(page, limit, response.total_count),
            data: response.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_defaults() {
        let params = QueryParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(DEFAULT_LIMIT, MAX_LIMIT), 20);
        assert_eq!(params.limit(5, MAX_LIMIT), 5);
    }

    #[test]
    fn test_pagination_meta_past_the_end() {
        let meta = PaginationMeta::new(usize::MAX, 20, 5);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_next);
        assert!(meta.has_prev);

        let meta = PaginationMeta::new(2, usize::MAX, 5);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_limit_is_clamped() {
        let params = QueryParams {
            limit: Some(1000),
            ..Default::default()
        };
        assert_eq!(params.limit(DEFAULT_LIMIT, 50), 50);

        let params = QueryParams {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(params.limit(DEFAULT_LIMIT, 50), 1);
    }

    #[test]
    fn test_to_request_converts_page_and_search() {
        let params = QueryParams {
            page: 3,
            limit: Some(10),
            filter: Some(r#"{"status": "open"}"#.to_string()),
            q: Some("roof".to_string()),
            sort: Some("posted_at:desc".to_string()),
        };
        let request = params.to_request(DEFAULT_LIMIT, MAX_LIMIT);

        assert_eq!(request.page, PageRequest::new(2, 10));
        assert_eq!(request.sort, SortSpec::desc("posted_at"));
        assert_eq!(request.filters.search_text(), Some("roof"));
        assert_eq!(request.filters.active_count(), 2);
    }

    #[test]
    fn test_invalid_filter_json_is_ignored() {
        let params = QueryParams {
            filter: Some("{not json".to_string()),
            ..Default::default()
        };
        assert!(params.to_request(DEFAULT_LIMIT, MAX_LIMIT).filters.is_empty());
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(SortSpec::parse("name"), SortSpec::asc("name"));
        assert_eq!(SortSpec::parse("name:asc"), SortSpec::asc("name"));
        assert_eq!(SortSpec::parse("rating:desc"), SortSpec::desc("rating"));
        assert_eq!(SortSpec::parse(""), SortSpec::insertion());
        assert_eq!(SortSpec::parse("name:sideways"), SortSpec::insertion());
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 20, 145);
        assert_eq!(meta.total, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev);
        assert!(meta.has_next);

        let empty = PaginationMeta::new(1, 20, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
    }

    #[test]
    fn test_page_count() {
        let response: QueryResponse<u8> = QueryResponse {
            items: vec![],
            total_count: 7,
        };
        assert_eq!(response.page_count(3), 3);
        assert_eq!(response.page_count(0), 1);
    }
}
