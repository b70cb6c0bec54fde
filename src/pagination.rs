use serde_json::Value as JsonValue;

/// Page size applied when the request carries no `limit`.
pub const DEFAULT_PER_PAGE: u64 = 10;
/// Page number applied when the request carries no `page`.
pub const DEFAULT_PAGE: u64 = 1;

/// Resolved page clause for one paginated invocation (1-based page).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Offset of the first row on this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.per_page
    }
}

/// Resolve the request's `page`/`limit` against the defaults. Only called
/// when the executing search has pagination enabled; without it no limit is
/// applied and every matching row is fetched.
#[must_use]
pub fn page_request(page: Option<u64>, limit: Option<u64>) -> PageRequest {
    PageRequest {
        page: page.unwrap_or(DEFAULT_PAGE),
        per_page: limit.unwrap_or(DEFAULT_PER_PAGE),
    }
}

/// One executed page: the rows plus the paginator counters. `total` is the
/// full matching-row count ignoring limit/offset.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub items: Vec<JsonValue>,
    pub total: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub last_page: u64,
}
