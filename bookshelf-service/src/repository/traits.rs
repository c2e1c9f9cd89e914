//! Repository trait definitions
//!
//! A single CRUD capability shared by every entity, written with RPITIT
//! (Return Position Impl Trait In Traits) so implementations are plain `async fn`s.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf_service::repository::{Pagination, Repository, RepositoryResult};
//!
//! struct PublisherRepository {
//!     pool: PgPool,
//! }
//!
//! impl Repository<RecordId, Publisher, PublisherDraft> for PublisherRepository {
//!     async fn find_by_id(&self, id: &RecordId) -> RepositoryResult<Option<Publisher>> {
//!         sqlx::query_as("SELECT id, name FROM publishers WHERE id = $1")
//!             .bind(id.get())
//!             .fetch_optional(&self.pool)
//!             .await
//!             .map_err(Into::into)
//!     }
//!     // ... other methods
//! }
//! ```

use std::future::Future;

use super::error::RepositoryError;
use super::pagination::Pagination;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// CRUD operations against one entity table
///
/// # Type Parameters
///
/// - `Id`: identifier type (store-assigned)
/// - `Entity`: the full record, identifier included
/// - `Draft`: every mutable field, no identifier; used for both create and
///   full-record update
pub trait Repository<Id, Entity, Draft>: Send + Sync {
    /// Find an entity by its unique identifier
    ///
    /// Returns `Ok(Some(entity))` if found, `Ok(None)` if not found.
    fn find_by_id(&self, id: &Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Find one page of entities ordered by identifier
    ///
    /// An empty table yields an empty vector, never an error.
    fn find_page(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;

    /// Insert a new entity and return it with its assigned identifier
    fn create(&self, draft: Draft) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Overwrite every mutable column of the entity with `id`
    ///
    /// Returns `true` if a row matched, `false` if none did.
    fn update(&self, id: &Id, draft: Draft) -> impl Future<Output = RepositoryResult<bool>> + Send;

    /// Delete an entity by its identifier
    ///
    /// Returns `true` if the entity was deleted, `false` if it didn't exist.
    fn delete(&self, id: &Id) -> impl Future<Output = RepositoryResult<bool>> + Send;
}
