//! Entity types exposed over the API
//!
//! Each entity comes as a pair: the stored record (identifier included) and a
//! draft holding every mutable field. Request bodies decode into drafts.

mod author;
mod book;
mod publisher;

pub use author::{Author, AuthorDraft};
pub use book::{Book, BookDraft, BookStatus, InvalidRating, ParseBookStatusError, Rating};
pub use publisher::{Publisher, PublisherDraft};

use serde::{de::DeserializeOwned, Serialize};

use crate::ids::RecordId;

/// A row-backed record type served by the generic handlers
pub trait Entity: Serialize + Clone + Send + Sync + 'static {
    /// Request body shape for create and update
    type Draft: DeserializeOwned + Clone + Send + Sync + 'static;

    /// Display name used in error messages ("Book", "Author", "Publisher")
    const NAME: &'static str;

    /// The store-assigned identifier
    fn id(&self) -> RecordId;

    /// Combine an identifier with a draft into a full record
    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;
}
