//! Handler trait for the REST collection pattern
//!
//! The HTTP layer parses identifiers and decodes bodies, then hands typed
//! values to a [`CollectionHandler`]. Errors come back as [`ApiError`] and
//! render themselves.

use std::future::Future;

use super::error::ApiError;
use super::query::PageQuery;
use crate::{ids::RecordId, models::Entity};

/// List, get, create, update and delete for one entity type
pub trait CollectionHandler<E: Entity>: Clone + Send + Sync + 'static {
    /// One normalized page, ordered by identifier
    fn list(&self, query: PageQuery) -> impl Future<Output = Result<Vec<E>, ApiError>> + Send;

    /// Exactly one record, or `NotFound`
    fn get(&self, id: RecordId) -> impl Future<Output = Result<E, ApiError>> + Send;

    /// The stored record with its assigned identifier
    fn create(&self, draft: E::Draft) -> impl Future<Output = Result<E, ApiError>> + Send;

    /// The record as submitted, identifier taken from the path
    fn update(
        &self,
        id: RecordId,
        draft: E::Draft,
    ) -> impl Future<Output = Result<E, ApiError>> + Send;

    /// Succeeds whether or not the record existed
    fn delete(&self, id: RecordId) -> impl Future<Output = Result<(), ApiError>> + Send;
}
