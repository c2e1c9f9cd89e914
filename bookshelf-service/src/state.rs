//! Application state shared by the operational endpoints

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;

/// Configuration plus the connection pool, when one is in use
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    db_pool: Option<PgPool>,
}

impl AppState {
    /// State for the in-memory store
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            db_pool: None,
        }
    }

    /// State backed by PostgreSQL
    pub fn with_pool(config: Config, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            db_pool: Some(pool),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The pool, or `None` when running on the in-memory store
    pub fn db(&self) -> Option<&PgPool> {
        self.db_pool.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_state_has_no_pool() {
        let state = AppState::default();
        assert!(state.db().is_none());
        assert_eq!(state.config().service.port, Config::default().service.port);
    }
}
