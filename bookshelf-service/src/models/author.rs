use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;
use crate::ids::RecordId;

/// A book author
///
/// Authors stand on their own; books point at them through an optional `authorId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[sqlx(try_from = "i64")]
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub pen_name: String,
}

/// Mutable author fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorDraft {
    pub first_name: String,
    pub last_name: String,
    pub pen_name: String,
}

impl Entity for Author {
    type Draft = AuthorDraft;

    const NAME: &'static str = "Author";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: AuthorDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            pen_name: draft.pen_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_format() {
        let draft: AuthorDraft = serde_json::from_str(
            r#"{"firstName": "Mary Ann", "lastName": "Evans", "penName": "George Eliot"}"#,
        )
        .unwrap();
        let author = Author::from_draft(RecordId::new(1).unwrap(), draft);

        assert_eq!(
            serde_json::to_value(&author).unwrap(),
            serde_json::json!({
                "id": 1,
                "firstName": "Mary Ann",
                "lastName": "Evans",
                "penName": "George Eliot"
            })
        );
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        assert!(serde_json::from_str::<AuthorDraft>(r#"{"firstName": 7}"#).is_err());
    }
}
