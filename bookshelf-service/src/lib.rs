//! # bookshelf-service
//!
//! REST service for books, authors and publishers.
//!
//! Each entity is served by the same generic stack: a [`repository::Repository`]
//! (PostgreSQL or in-memory), an [`handlers::EntityHandler`] that validates
//! input and maps failures to HTTP errors, and five routes built by
//! [`routes::entity_routes`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bookshelf_service::{
//!     config::Config, models::{Author, Book, Publisher}, observability::init_tracing,
//!     repository::MemoryRepository,
//!     routes, server::Server, state::AppState,
//! };
//!
//! #[tokio::main]
//! async fn main() -> bookshelf_service::error::Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let app = routes::app(
//!         AppState::new(config.clone()),
//!         Arc::new(MemoryRepository::<Book>::new()),
//!         Arc::new(MemoryRepository::<Author>::new()),
//!         Arc::new(MemoryRepository::<Publisher>::new()),
//!     );
//!
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod ids;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod server;
pub mod state;
