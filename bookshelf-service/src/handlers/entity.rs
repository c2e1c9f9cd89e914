//! Generic mediator between the HTTP layer and a repository
//!
//! One [`EntityHandler`] per entity type. Every store call runs under the
//! configured statement timeout; store failures become [`ApiError`]s carrying
//! the entity name.

use std::{future::Future, marker::PhantomData, sync::Arc, time::Duration};

use super::error::ApiError;
use super::query::PageQuery;
use super::traits::CollectionHandler;
use crate::{
    ids::RecordId,
    models::Entity,
    repository::{Repository, RepositoryError, RepositoryOperation, RepositoryResult},
};

/// Collection handler backed by any [`Repository`] for `E`
pub struct EntityHandler<E, R> {
    repository: Arc<R>,
    store_timeout: Duration,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> Clone for EntityHandler<E, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            store_timeout: self.store_timeout,
            _entity: PhantomData,
        }
    }
}

impl<E, R> EntityHandler<E, R> {
    pub fn new(repository: Arc<R>, store_timeout: Duration) -> Self {
        Self {
            repository,
            store_timeout,
            _entity: PhantomData,
        }
    }

    /// The underlying repository
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }
}

impl<E: Entity, R> EntityHandler<E, R> {
    async fn call<T>(
        &self,
        operation: RepositoryOperation,
        entity_id: Option<RecordId>,
        fut: impl Future<Output = RepositoryResult<T>>,
    ) -> Result<T, ApiError> {
        let outcome = match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(RepositoryError::timeout(
                operation,
                format!("Store call exceeded {:?}", self.store_timeout),
            )),
        };

        outcome.map_err(|err| {
            let err = err.with_operation(operation);
            let err = match entity_id {
                Some(id) => err.with_entity(E::NAME, id.to_string()),
                None => err,
            };
            ApiError::from(err).with_entity_type(E::NAME)
        })
    }
}

impl<E, R> CollectionHandler<E> for EntityHandler<E, R>
where
    E: Entity,
    R: Repository<RecordId, E, E::Draft> + 'static,
{
    async fn list(&self, query: PageQuery) -> Result<Vec<E>, ApiError> {
        let pagination = query.pagination();
        self.call(
            RepositoryOperation::FindPage,
            None,
            self.repository.find_page(pagination),
        )
        .await
    }

    async fn get(&self, id: RecordId) -> Result<E, ApiError> {
        self.call(
            RepositoryOperation::FindById,
            Some(id),
            self.repository.find_by_id(&id),
        )
        .await?
        .ok_or_else(|| ApiError::not_found(E::NAME, id.to_string()))
    }

    async fn create(&self, draft: E::Draft) -> Result<E, ApiError> {
        let entity = self
            .call(
                RepositoryOperation::Create,
                None,
                self.repository.create(draft),
            )
            .await?;

        tracing::info!(entity_type = E::NAME, id = %entity.id(), "Created record");
        Ok(entity)
    }

    async fn update(&self, id: RecordId, draft: E::Draft) -> Result<E, ApiError> {
        let matched = self
            .call(
                RepositoryOperation::Update,
                Some(id),
                self.repository.update(&id, draft.clone()),
            )
            .await?;

        // A missing row is still answered with the submitted record.
        if !matched {
            tracing::warn!(entity_type = E::NAME, id = %id, "Update matched no rows");
        }

        Ok(E::from_draft(id, draft))
    }

    async fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        let removed = self
            .call(
                RepositoryOperation::Delete,
                Some(id),
                self.repository.delete(&id),
            )
            .await?;

        tracing::debug!(entity_type = E::NAME, id = %id, removed, "Delete processed");
        Ok(())
    }
}
