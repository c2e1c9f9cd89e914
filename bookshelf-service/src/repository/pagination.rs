//! Offset/limit window passed to [`Repository::find_page`](super::Repository::find_page)

/// Pagination parameters for page queries
///
/// # Example
///
/// ```rust
/// use bookshelf_service::repository::Pagination;
///
/// let page = Pagination::new(20, 10); // Skip 20, take 10
/// assert_eq!(page.offset, 20);
/// assert_eq!(Pagination::first_page(10).offset, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of results to skip
    pub offset: u64,
    /// Maximum number of results to return
    pub limit: u64,
}

impl Pagination {
    /// Create new pagination parameters
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Create pagination for the first page with the given limit
    #[must_use]
    pub const fn first_page(limit: u64) -> Self {
        Self { offset: 0, limit }
    }

    /// Offset as a SQL bind value
    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    /// Limit as a SQL bind value
    pub fn limit_i64(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}
