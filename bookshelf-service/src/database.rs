//! PostgreSQL connection pool management

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    config::DatabaseConfig,
    error::{Error, Result},
};

/// Create a PostgreSQL connection pool, retrying with exponential backoff
///
/// Makes `max_retries + 1` attempts in total; the delay starts at
/// `retry_delay_secs` and doubles after each failure.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let mut attempt = 0;

    loop {
        match try_create_pool(config).await {
            Ok(pool) => {
                if attempt > 0 {
                    tracing::info!(
                        "Database connection established after {} attempt(s)",
                        attempt + 1
                    );
                } else {
                    tracing::info!(
                        "Database connection pool created: max={}, min={}",
                        config.max_connections,
                        config.min_connections
                    );
                }
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::error!(
                        "Failed to connect to database after {} attempts: {}",
                        config.max_retries + 1,
                        e
                    );
                    return Err(e);
                }

                let delay = retry_delay(config, attempt);
                tracing::warn!(
                    "Database connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Backoff before retry number `attempt` (1-based)
fn retry_delay(config: &DatabaseConfig, attempt: u32) -> Duration {
    let multiplier = 2_u32.saturating_pow(attempt.saturating_sub(1));
    Duration::from_secs(config.retry_delay_secs).saturating_mul(multiplier)
}

async fn try_create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| {
            Error::Database(format!(
                "Failed to connect to database at '{}': {} ({})",
                sanitize_connection_url(&config.url),
                categorize_db_error(&e),
                e
            ))
        })
}

/// Mask the password of a connection URL for logging
pub fn sanitize_connection_url(url: &str) -> String {
    let (Some(scheme_end), Some(at_pos)) = (url.find("://"), url.rfind('@')) else {
        return url.to_string();
    };
    let credentials_start = scheme_end + 3;
    if at_pos < credentials_start {
        return url.to_string();
    }

    match url[credentials_start..at_pos].find(':') {
        Some(colon) => format!(
            "{}{}:***{}",
            &url[..credentials_start],
            &url[credentials_start..credentials_start + colon],
            &url[at_pos..]
        ),
        None => url.to_string(),
    }
}

/// Short operator hint for a connection failure
fn categorize_db_error(err: &sqlx::Error) -> &'static str {
    use sqlx::Error as E;
    match err {
        E::Configuration(_) => "configuration error, check the URL format",
        E::Database(_) => "rejected by the server, check credentials and database name",
        E::Io(_) => "network I/O error, check connectivity",
        E::Tls(_) => "TLS error, check certificate configuration",
        E::PoolTimedOut => "timed out waiting for a connection",
        E::PoolClosed => "connection pool closed",
        _ => "connection error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_masks_password() {
        assert_eq!(
            sanitize_connection_url("postgres://shelf:s3cret@db:5432/books"),
            "postgres://shelf:***@db:5432/books"
        );
    }

    #[test]
    fn test_sanitize_leaves_passwordless_urls() {
        for url in [
            "postgres://db:5432/books",
            "postgres://shelf@db/books",
            "not a url",
        ] {
            assert_eq!(sanitize_connection_url(url), url);
        }
    }

    #[test]
    fn test_retry_delay_doubles() {
        let config = DatabaseConfig::with_url("postgres://localhost/books");
        assert_eq!(retry_delay(&config, 1), Duration::from_secs(2));
        assert_eq!(retry_delay(&config, 2), Duration::from_secs(4));
        assert_eq!(retry_delay(&config, 3), Duration::from_secs(8));
    }

    #[test]
    fn test_categorize_pool_errors() {
        assert_eq!(
            categorize_db_error(&sqlx::Error::PoolTimedOut),
            "timed out waiting for a connection"
        );
        assert_eq!(categorize_db_error(&sqlx::Error::RowNotFound), "connection error");
    }

    #[tokio::test]
    async fn test_unreachable_database_fails_after_retries() {
        let mut config = DatabaseConfig::with_url("postgres://shelf:pw@127.0.0.1:1/books");
        config.max_retries = 0;
        config.connection_timeout_secs = 1;

        let err = create_pool(&config).await.unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::Database(_)));
        assert!(!message.contains("pw@"));
    }
}
