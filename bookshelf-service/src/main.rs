use std::sync::Arc;

use bookshelf_service::{
    config::Config,
    database::{create_pool, sanitize_connection_url},
    error::Result,
    models::{Author, Book, Publisher},
    observability::init_tracing,
    repository::{MemoryRepository, PgAuthorRepository, PgBookRepository, PgPublisherRepository},
    routes,
    server::Server,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is not an error
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_tracing(&config)?;

    let app = match config.database.clone() {
        Some(database) => {
            tracing::info!(
                url = %sanitize_connection_url(&database.url),
                "Using PostgreSQL store"
            );
            let pool = create_pool(&database).await?;
            routes::app(
                AppState::with_pool(config.clone(), pool.clone()),
                Arc::new(PgBookRepository::new(pool.clone())),
                Arc::new(PgAuthorRepository::new(pool.clone())),
                Arc::new(PgPublisherRepository::new(pool)),
            )
        }
        None => {
            tracing::warn!("No database configured, records are kept in memory only");
            routes::app(
                AppState::new(config.clone()),
                Arc::new(MemoryRepository::<Book>::new()),
                Arc::new(MemoryRepository::<Author>::new()),
                Arc::new(MemoryRepository::<Publisher>::new()),
            )
        }
    };

    Server::new(config).serve(app).await
}
