//! Repository traits and implementations for the three entity tables
//!
//! - [`Repository`]: the CRUD capability every store offers
//! - [`MemoryRepository`]: in-process store, one per entity type
//! - [`PgBookRepository`], [`PgAuthorRepository`], [`PgPublisherRepository`]: PostgreSQL stores

mod error;
mod memory;
mod pagination;
mod postgres;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::MemoryRepository;
pub use pagination::Pagination;
pub use postgres::{PgAuthorRepository, PgBookRepository, PgPublisherRepository};
pub use traits::{Repository, RepositoryResult};
