//! Liveness and readiness endpoints

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,

    /// Service name
    pub service: String,

    /// Crate version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Readiness response with per-dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness
    pub ready: bool,

    /// Service name
    pub service: String,

    /// Dependency statuses, keyed by name
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Individual dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    pub healthy: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness probe, always `200 OK`
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.config().service.name.clone(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness probe
///
/// `200 OK` when the store answers, `503 Service Unavailable` otherwise. The
/// in-memory store is always ready.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let mut dependencies = HashMap::new();

    let store = match state.db() {
        Some(pool) => {
            let probe = sqlx::query("SELECT 1").fetch_one(pool);
            match tokio::time::timeout(state.config().statement_timeout(), probe).await {
                Ok(Ok(_)) => DependencyStatus {
                    healthy: true,
                    message: Some("Connected".to_string()),
                },
                Ok(Err(e)) => {
                    tracing::error!("Database health check failed: {}", e);
                    DependencyStatus {
                        healthy: false,
                        message: Some(format!("Connection failed: {}", e)),
                    }
                }
                Err(_) => {
                    tracing::error!("Database health check timed out");
                    DependencyStatus {
                        healthy: false,
                        message: Some("Timed out".to_string()),
                    }
                }
            }
        }
        None => DependencyStatus {
            healthy: true,
            message: Some("In-memory store".to_string()),
        },
    };

    let all_ready = store.healthy;
    dependencies.insert("database".to_string(), store);

    let response = ReadinessResponse {
        ready: all_ready,
        service: state.config().service.name.clone(),
        dependencies,
    };

    let status = if all_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
