use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;
use crate::ids::RecordId;

/// A publishing house
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Publisher {
    #[sqlx(try_from = "i64")]
    pub id: RecordId,
    pub name: String,
}

/// Mutable publisher fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PublisherDraft {
    pub name: String,
}

impl Entity for Publisher {
    type Draft = PublisherDraft;

    const NAME: &'static str = "Publisher";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: PublisherDraft) -> Self {
        Self {
            id,
            name: draft.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_ignores_body_id() {
        let draft: PublisherDraft =
            serde_json::from_str(r#"{"id": 99, "name": "Allen & Unwin"}"#).unwrap();
        assert_eq!(draft.name, "Allen & Unwin");

        let publisher = Publisher::from_draft(RecordId::new(4).unwrap(), draft);
        assert_eq!(
            serde_json::to_value(&publisher).unwrap(),
            serde_json::json!({"id": 4, "name": "Allen & Unwin"})
        );
    }

    #[test]
    fn test_empty_body_decodes_to_defaults() {
        let draft: PublisherDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(draft, PublisherDraft::default());
    }
}
