//! Router assembly
//!
//! Each entity gets a plural collection path and a singular item path:
//!
//! | Method | Path                  |
//! |--------|-----------------------|
//! | GET    | `/books?count=&start=`|
//! | POST   | `/book`               |
//! | GET    | `/book/{id}`          |
//! | PUT    | `/book/{id}`          |
//! | DELETE | `/book/{id}`          |
//!
//! and likewise for `authors`/`author` and `publishers`/`publisher`.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::{
    handlers::{
        decode_draft, path_id, ApiError, ApiOperation, CollectionHandler, Created, DeleteResult,
        EntityHandler, PageQuery,
    },
    health,
    ids::RecordId,
    models::{Author, AuthorDraft, Book, BookDraft, Entity, Publisher, PublisherDraft},
    repository::Repository,
    state::AppState,
};

async fn list_entities<E, H>(
    State(handler): State<H>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<E>>, ApiError>
where
    E: Entity,
    H: CollectionHandler<E>,
{
    let query = PageQuery::from_pairs(pairs);
    Ok(Json(handler.list(query).await?))
}

async fn get_entity<E, H>(
    State(handler): State<H>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<E>, ApiError>
where
    E: Entity,
    H: CollectionHandler<E>,
{
    let id = path_id::<E>(ApiOperation::Get, path)?;
    Ok(Json(handler.get(id).await?))
}

async fn create_entity<E, H>(State(handler): State<H>, body: Bytes) -> Result<Created<E>, ApiError>
where
    E: Entity,
    H: CollectionHandler<E>,
{
    let draft = decode_draft::<E>(ApiOperation::Create, &body)?;
    Ok(Created(handler.create(draft).await?))
}

async fn update_entity<E, H>(
    State(handler): State<H>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<E>, ApiError>
where
    E: Entity,
    H: CollectionHandler<E>,
{
    let id = path_id::<E>(ApiOperation::Update, path)?;
    let draft = decode_draft::<E>(ApiOperation::Update, &body)?;
    Ok(Json(handler.update(id, draft).await?))
}

async fn delete_entity<E, H>(
    State(handler): State<H>,
    path: Result<Path<String>, PathRejection>,
) -> Result<DeleteResult, ApiError>
where
    E: Entity,
    H: CollectionHandler<E>,
{
    let id = path_id::<E>(ApiOperation::Delete, path)?;
    handler.delete(id).await?;
    Ok(DeleteResult::success())
}

/// The five routes for one entity, served by `handler`
///
/// `collection` is the plural list path (`/books`), `item` the singular path
/// that takes creates and, with `/{id}` appended, the single-record operations.
pub fn entity_routes<E, H>(collection: &str, item: &str, handler: H) -> Router
where
    E: Entity,
    H: CollectionHandler<E>,
{
    Router::new()
        .route(collection, get(list_entities::<E, H>))
        .route(item, post(create_entity::<E, H>))
        .route(
            &format!("{}/{{id}}", item),
            get(get_entity::<E, H>)
                .put(update_entity::<E, H>)
                .delete(delete_entity::<E, H>),
        )
        .with_state(handler)
}

/// Entity routes for all three entity types
///
/// Every repository call is bounded by `store_timeout`.
pub fn api_router<B, A, P>(
    books: Arc<B>,
    authors: Arc<A>,
    publishers: Arc<P>,
    store_timeout: Duration,
) -> Router
where
    B: Repository<RecordId, Book, BookDraft> + 'static,
    A: Repository<RecordId, Author, AuthorDraft> + 'static,
    P: Repository<RecordId, Publisher, PublisherDraft> + 'static,
{
    Router::new()
        .merge(entity_routes::<Book, _>(
            "/books",
            "/book",
            EntityHandler::<Book, B>::new(books, store_timeout),
        ))
        .merge(entity_routes::<Author, _>(
            "/authors",
            "/author",
            EntityHandler::<Author, A>::new(authors, store_timeout),
        ))
        .merge(entity_routes::<Publisher, _>(
            "/publishers",
            "/publisher",
            EntityHandler::<Publisher, P>::new(publishers, store_timeout),
        ))
}

/// `/health` and `/ready`
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::readiness))
        .with_state(state)
}

/// The full application router: entity routes plus health endpoints
pub fn app<B, A, P>(state: AppState, books: Arc<B>, authors: Arc<A>, publishers: Arc<P>) -> Router
where
    B: Repository<RecordId, Book, BookDraft> + 'static,
    A: Repository<RecordId, Author, AuthorDraft> + 'static,
    P: Repository<RecordId, Publisher, PublisherDraft> + 'static,
{
    let store_timeout = state.config().statement_timeout();
    api_router(books, authors, publishers, store_timeout).merge(health_routes(state))
}
