//! Identifiers used by the service
//!
//! - [`RecordId`]: store-assigned row identifier shared by books, authors and publishers
//! - [`RequestId`]: per-request tracing identifier, generated by the request id layer
//!
//! # Example
//!
//! ```rust
//! use bookshelf_service::ids::RecordId;
//!
//! let id: RecordId = "42".parse().unwrap();
//! assert_eq!(id.get(), 42);
//! assert!("0".parse::<RecordId>().is_err());
//! assert!("4x".parse::<RecordId>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use http::Request;
use serde::Serialize;
use tower_http::request_id::{MakeRequestId, RequestId as TowerRequestId};
use uuid::Uuid;

/// Strictly-positive integer identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw value, rejecting zero and negatives
    #[must_use]
    pub const fn new(value: i64) -> Option<Self> {
        if value > 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The raw integer value
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a path segment is not a valid [`RecordId`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not a positive integer identifier")]
pub struct ParseRecordIdError {
    /// The rejected input
    pub input: String,
}

impl FromStr for RecordId {
    type Err = ParseRecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseRecordIdError {
            input: s.to_string(),
        };

        // i64::from_str accepts a leading sign, which is not a valid path id
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        s.parse::<i64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(invalid)
    }
}

impl TryFrom<i64> for RecordId {
    type Error = ParseRecordIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| ParseRecordIdError {
            input: value.to_string(),
        })
    }
}

/// Request identifier for log correlation
///
/// Format: `req_` followed by a simple-encoded UUIDv7, so ids sort by creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new request id
    #[must_use]
    pub fn new() -> Self {
        Self(format!("req_{}", Uuid::now_v7().simple()))
    }

    /// Borrow the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// [`MakeRequestId`] implementation producing [`RequestId`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeBookshelfRequestId;

impl MakeRequestId for MakeBookshelfRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<TowerRequestId> {
        let id = RequestId::new();
        let header_value = http::HeaderValue::from_str(id.as_str()).ok()?;
        Some(TowerRequestId::new(header_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        assert_eq!("1".parse::<RecordId>().unwrap().get(), 1);
        assert_eq!("007".parse::<RecordId>().unwrap().get(), 7);
        assert_eq!(
            "9223372036854775807".parse::<RecordId>().unwrap().get(),
            i64::MAX
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "abc", "12a", "a12", " 12", "12 ", "1.5", "+3", "-3", "0", "00"] {
            assert!(
                input.parse::<RecordId>().is_err(),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!("9223372036854775808".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_parse_error_keeps_input() {
        let err = "abc".parse::<RecordId>().unwrap_err();
        assert_eq!(err.input, "abc");
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_new_rejects_non_positive() {
        assert!(RecordId::new(0).is_none());
        assert!(RecordId::new(-1).is_none());
        assert_eq!(RecordId::new(5).map(RecordId::get), Some(5));
    }

    #[test]
    fn test_try_from_column_value() {
        assert_eq!(RecordId::try_from(3_i64).map(RecordId::get), Ok(3));
        assert!(RecordId::try_from(0_i64).is_err());
    }

    #[test]
    fn test_record_id_serializes_as_integer() {
        let id = RecordId::new(12).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");
    }

    #[test]
    fn test_request_id_format() {
        let id = RequestId::new();
        assert!(id.as_str().starts_with("req_"));
        // prefix (4) + simple uuid (32)
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn test_make_request_id() {
        let mut maker = MakeBookshelfRequestId;
        let request = http::Request::builder().body(()).unwrap();

        let id = maker.make_request_id(&request);
        let header_value = id.unwrap().into_header_value();
        assert!(header_value.to_str().unwrap().starts_with("req_"));
    }
}
