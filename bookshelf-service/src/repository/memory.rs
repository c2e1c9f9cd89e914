//! In-process repository
//!
//! Backs the service when no database is configured and drives the HTTP tests.
//! One instance per entity type is built at startup and shared behind an `Arc`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
use super::pagination::Pagination;
use super::traits::{Repository, RepositoryResult};
use crate::{ids::RecordId, models::Entity};

/// Ordered map of records plus an identifier sequence starting at 1
#[derive(Debug)]
pub struct MemoryRepository<E> {
    rows: RwLock<BTreeMap<RecordId, E>>,
    next_id: AtomicI64,
}

impl<E> MemoryRepository<E> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the repository holds no records
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<E> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

impl<E: Entity> Repository<RecordId, E, E::Draft> for MemoryRepository<E> {
    async fn find_by_id(&self, id: &RecordId) -> RepositoryResult<Option<E>> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn find_page(&self, pagination: Pagination) -> RepositoryResult<Vec<E>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .skip(to_usize(pagination.offset))
            .take(to_usize(pagination.limit))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: E::Draft) -> RepositoryResult<E> {
        let raw = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = RecordId::new(raw).ok_or_else(|| {
            RepositoryError::new(
                RepositoryOperation::Create,
                RepositoryErrorKind::Other,
                "Identifier sequence exhausted",
            )
        })?;

        let entity = E::from_draft(id, draft);
        self.rows.write().await.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: &RecordId, draft: E::Draft) -> RepositoryResult<bool> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(id) {
            Some(slot) => {
                *slot = E::from_draft(*id, draft);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &RecordId) -> RepositoryResult<bool> {
        Ok(self.rows.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Publisher, PublisherDraft};

    fn draft(name: &str) -> PublisherDraft {
        PublisherDraft {
            name: name.to_string(),
        }
    }

    fn id(value: i64) -> RecordId {
        RecordId::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = MemoryRepository::<Publisher>::new();
        let first = repo.create(draft("Penguin")).await.unwrap();
        let second = repo.create(draft("Faber")).await.unwrap();

        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = MemoryRepository::<Publisher>::new();
        let created = repo.create(draft("Penguin")).await.unwrap();

        assert_eq!(repo.find_by_id(&created.id).await.unwrap(), Some(created));
        assert_eq!(repo.find_by_id(&id(42)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_page_applies_offset_and_limit() {
        let repo = MemoryRepository::<Publisher>::new();
        for n in 1..=5 {
            repo.create(draft(&format!("p{}", n))).await.unwrap();
        }

        let page = repo.find_page(Pagination::new(1, 2)).await.unwrap();
        let names: Vec<_> = page.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["p2", "p3"]);

        assert!(repo.find_page(Pagination::new(10, 2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_page_on_empty_store() {
        let repo = MemoryRepository::<Publisher>::new();
        assert!(repo.is_empty().await);
        assert!(repo.find_page(Pagination::first_page(10)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_existing_row() {
        let repo = MemoryRepository::<Publisher>::new();
        let created = repo.create(draft("Penguin")).await.unwrap();

        assert!(repo.update(&created.id, draft("Puffin")).await.unwrap());
        let stored = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Puffin");
    }

    #[tokio::test]
    async fn test_update_missing_row_reports_false() {
        let repo = MemoryRepository::<Publisher>::new();
        assert!(!repo.update(&id(3), draft("Ghost")).await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = MemoryRepository::<Publisher>::new();
        let created = repo.create(draft("Penguin")).await.unwrap();

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = MemoryRepository::<Publisher>::new();
        let first = repo.create(draft("Penguin")).await.unwrap();
        repo.delete(&first.id).await.unwrap();

        let second = repo.create(draft("Faber")).await.unwrap();
        assert_eq!(second.id.get(), 2);
    }
}
