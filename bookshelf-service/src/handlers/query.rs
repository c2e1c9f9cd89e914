//! Query parameters for list operations
//!
//! `count` and `start` arrive as free-form strings and are normalized, never
//! rejected: anything unusable falls back to the defaults.
//!
//! # Example
//!
//! ```rust
//! use bookshelf_service::handlers::PageQuery;
//!
//! let query = PageQuery::from_pairs(vec![
//!     ("count".to_string(), "999".to_string()),
//!     ("start".to_string(), "-4".to_string()),
//! ]);
//! assert_eq!(query.count(), 10);
//! assert_eq!(query.start(), 0);
//! ```

use crate::repository::Pagination;

/// Default number of items per page
pub const DEFAULT_COUNT: u64 = 10;

/// Maximum allowed items per page
pub const MAX_COUNT: u64 = 10;

/// Raw `count` / `start` query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Requested page size, as sent
    pub count: Option<String>,
    /// Requested offset, as sent
    pub start: Option<String>,
}

impl PageQuery {
    /// Build from decoded query pairs; the first occurrence of a key wins
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "count" if query.count.is_none() => query.count = Some(value),
                "start" if query.start.is_none() => query.start = Some(value),
                _ => {}
            }
        }
        query
    }

    /// Page size in `1..=MAX_COUNT`, `DEFAULT_COUNT` when missing or out of range
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(|n| u64::try_from(n).ok())
            .filter(|n| (1..=MAX_COUNT).contains(n))
            .unwrap_or(DEFAULT_COUNT)
    }

    /// Offset, `0` when missing, non-numeric or negative
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0)
    }

    /// Normalized offset/limit window
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.start(), self.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(count: Option<&str>, start: Option<&str>) -> PageQuery {
        PageQuery {
            count: count.map(str::to_string),
            start: start.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults_when_absent() {
        let q = PageQuery::default();
        assert_eq!(q.count(), DEFAULT_COUNT);
        assert_eq!(q.start(), 0);
        assert_eq!(q.pagination(), Pagination::new(0, 10));
    }

    #[test]
    fn test_count_within_range_is_kept() {
        assert_eq!(query(Some("1"), None).count(), 1);
        assert_eq!(query(Some("7"), None).count(), 7);
        assert_eq!(query(Some("10"), None).count(), 10);
    }

    #[test]
    fn test_count_out_of_range_defaults() {
        for raw in ["0", "11", "999", "-5", "abc", "", "3.5", "99999999999999999999"] {
            assert_eq!(query(Some(raw), None).count(), 10, "count={}", raw);
        }
    }

    #[test]
    fn test_start_normalization() {
        assert_eq!(query(None, Some("25")).start(), 25);
        assert_eq!(query(None, Some("0")).start(), 0);
        assert_eq!(query(None, Some("-1")).start(), 0);
        assert_eq!(query(None, Some("ten")).start(), 0);
    }

    #[test]
    fn test_signed_numbers_parse() {
        assert_eq!(query(Some("+4"), Some("+2")).pagination(), Pagination::new(2, 4));
    }

    #[test]
    fn test_from_pairs_first_occurrence_wins() {
        let q = PageQuery::from_pairs(vec![
            ("start".to_string(), "3".to_string()),
            ("count".to_string(), "5".to_string()),
            ("count".to_string(), "2".to_string()),
            ("sort".to_string(), "title".to_string()),
        ]);
        assert_eq!(q, query(Some("5"), Some("3")));
    }
}
