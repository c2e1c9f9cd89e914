use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use super::Entity;
use crate::ids::RecordId;

/// One to three stars
///
/// Serialized as the bare integer (`1`, `2` or `3`); any other number fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum Rating {
    OneStar,
    TwoStars,
    ThreeStars,
}

/// Error for a rating outside `1..=3`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rating must be 1, 2 or 3, got {0}")]
pub struct InvalidRating(pub i16);

impl TryFrom<i16> for Rating {
    type Error = InvalidRating;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::OneStar),
            2 => Ok(Self::TwoStars),
            3 => Ok(Self::ThreeStars),
            other => Err(InvalidRating(other)),
        }
    }
}

impl From<Rating> for i16 {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::OneStar => 1,
            Rating::TwoStars => 2,
            Rating::ThreeStars => 3,
        }
    }
}

/// Whether the copy is on the shelf
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookStatus {
    #[default]
    CheckedIn,
    CheckedOut,
}

impl BookStatus {
    /// Column and wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CheckedIn => "checked-in",
            Self::CheckedOut => "checked-out",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a `book_available` value that names no [`BookStatus`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown book status '{input}'")]
pub struct ParseBookStatusError {
    pub input: String,
}

impl FromStr for BookStatus {
    type Err = ParseBookStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checked-in" => Ok(Self::CheckedIn),
            "checked-out" => Ok(Self::CheckedOut),
            other => Err(ParseBookStatusError {
                input: other.to_string(),
            }),
        }
    }
}

/// Read `publishedDate` as a calendar date
///
/// Takes `YYYY-MM-DD`, an RFC 3339 timestamp or a zone-less
/// `YYYY-MM-DDTHH:MM:SS`; timestamps keep the date as written.
fn published_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.date_naive()))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("invalid publication date '{}'", raw)))
}

/// A book on the shelf
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub published_date: Option<NaiveDate>,
    pub rating: Option<Rating>,
    pub status: BookStatus,
    pub publisher_id: Option<i64>,
    pub author_id: Option<i64>,
}

/// Mutable book fields
///
/// Every field is optional on the wire; a missing `status` means checked in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    #[serde(deserialize_with = "published_date")]
    pub published_date: Option<NaiveDate>,
    pub rating: Option<Rating>,
    pub status: BookStatus,
    pub publisher_id: Option<i64>,
    pub author_id: Option<i64>,
}

impl Entity for Book {
    type Draft = BookDraft;

    const NAME: &'static str = "Book";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            published_date: draft.published_date,
            rating: draft.rating,
            status: draft.status,
            publisher_id: draft.publisher_id,
            author_id: draft.author_id,
        }
    }
}

fn column_decode_error(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for Book {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let rating: Option<i16> = row.try_get("rating")?;
        let status: String = row.try_get("book_available")?;

        Ok(Self {
            id: RecordId::try_from(id).map_err(|e| column_decode_error("id", e))?,
            title: row.try_get("title")?,
            published_date: row.try_get("published_date")?,
            rating: rating
                .map(Rating::try_from)
                .transpose()
                .map_err(|e| column_decode_error("rating", e))?,
            status: status
                .parse::<BookStatus>()
                .map_err(|e| column_decode_error("book_available", e))?,
            publisher_id: row.try_get("publisher_id")?,
            author_id: row.try_get("author_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_wire_format() {
        assert_eq!(serde_json::to_string(&Rating::TwoStars).unwrap(), "2");
        assert_eq!(serde_json::from_str::<Rating>("3").unwrap(), Rating::ThreeStars);
        assert!(serde_json::from_str::<Rating>("0").is_err());
        assert!(serde_json::from_str::<Rating>("4").is_err());
        assert!(serde_json::from_str::<Rating>("\"two\"").is_err());
    }

    #[test]
    fn test_rating_conversions_are_exhaustive() {
        for rating in [Rating::OneStar, Rating::TwoStars, Rating::ThreeStars] {
            assert_eq!(Rating::try_from(i16::from(rating)), Ok(rating));
        }
        assert_eq!(Rating::try_from(-1), Err(InvalidRating(-1)));
        assert_eq!(InvalidRating(7).to_string(), "rating must be 1, 2 or 3, got 7");
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&BookStatus::CheckedOut).unwrap(),
            "\"checked-out\""
        );
        assert_eq!(
            serde_json::from_str::<BookStatus>("\"checked-in\"").unwrap(),
            BookStatus::CheckedIn
        );
        assert!(serde_json::from_str::<BookStatus>("\"lost\"").is_err());
    }

    #[test]
    fn test_status_column_round_trip() {
        for status in [BookStatus::CheckedIn, BookStatus::CheckedOut] {
            assert_eq!(status.as_str().parse::<BookStatus>(), Ok(status));
        }
        assert_eq!(
            "on-loan".parse::<BookStatus>().unwrap_err().to_string(),
            "unknown book status 'on-loan'"
        );
    }

    #[test]
    fn test_partial_draft_uses_defaults() {
        let draft: BookDraft =
            serde_json::from_str(r#"{"title":"The Hobbit","publishedDate":"1937-09-21"}"#)
                .unwrap();
        assert_eq!(draft.title, "The Hobbit");
        assert_eq!(draft.published_date, NaiveDate::from_ymd_opt(1937, 9, 21));
        assert_eq!(draft.rating, None);
        assert_eq!(draft.status, BookStatus::CheckedIn);
        assert_eq!(draft.author_id, None);
    }

    #[test]
    fn test_published_date_accepts_timestamps() {
        let expected = NaiveDate::from_ymd_opt(1937, 9, 21);
        for raw in [
            "1937-09-21T00:00:00Z",
            "1937-09-21T23:30:00-05:00",
            "1937-09-21T08:15:00",
            "1937-09-21T08:15:00.250",
        ] {
            let json = format!(r#"{{"publishedDate":"{}"}}"#, raw);
            let draft: BookDraft = serde_json::from_str(&json).unwrap();
            assert_eq!(draft.published_date, expected, "{}", raw);
        }

        let draft: BookDraft = serde_json::from_str(r#"{"publishedDate":null}"#).unwrap();
        assert_eq!(draft.published_date, None);
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        assert!(serde_json::from_str::<BookDraft>(r#"{"publishedDate":"21/09/1937"}"#).is_err());
    }

    #[test]
    fn test_book_serialization() {
        let draft = BookDraft {
            title: "Middlemarch".to_string(),
            published_date: NaiveDate::from_ymd_opt(1871, 12, 1),
            rating: Some(Rating::ThreeStars),
            status: BookStatus::CheckedOut,
            publisher_id: Some(2),
            author_id: None,
        };
        let book = Book::from_draft(RecordId::new(8).unwrap(), draft);

        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            serde_json::json!({
                "id": 8,
                "title": "Middlemarch",
                "publishedDate": "1871-12-01",
                "rating": 3,
                "status": "checked-out",
                "publisherId": 2,
                "authorId": null
            })
        );
    }
}
