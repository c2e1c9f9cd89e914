//! HTTP-facing layer between routes and repositories
//!
//! Routes parse path identifiers with [`path_id`] and bodies with
//! [`decode_draft`], then call a [`CollectionHandler`]. [`EntityHandler`] is the
//! one implementation, generic over entity and repository, so books, authors and
//! publishers share the same validation and error mapping.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::{sync::Arc, time::Duration};
//! use bookshelf_service::handlers::{CollectionHandler, EntityHandler, PageQuery};
//! use bookshelf_service::models::Publisher;
//! use bookshelf_service::repository::MemoryRepository;
//!
//! let handler: EntityHandler<Publisher, _> =
//!     EntityHandler::new(Arc::new(MemoryRepository::new()), Duration::from_secs(5));
//! let page = handler.list(PageQuery::default()).await?;
//! ```

mod entity;
mod error;
mod extract;
mod query;
mod response;
mod traits;

pub use entity::EntityHandler;
pub use error::{ApiError, ApiErrorKind, ApiOperation, ErrorBody, INVALID_PAYLOAD};
pub use extract::{decode_draft, parse_id, path_id};
pub use query::{PageQuery, DEFAULT_COUNT, MAX_COUNT};
pub use response::{Created, DeleteResult};
pub use traits::CollectionHandler;
