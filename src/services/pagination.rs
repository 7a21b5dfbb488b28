//! Page/offset computation for transaction listings

/// A validated, clamped page request (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to `page >= 1` and `1 <= per_page <= max_per_page`
    pub fn new(page: u32, per_page: u32, max_per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, max_per_page.max(1)),
        }
    }

    /// Number of matching records to skip
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.per_page)
    }

    /// Maximum number of records on the page
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}
