//! Health check endpoint.

use crate::storage::Storage;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: bool,
}

/// GET /health - Liveness plus a database ping
async fn health_check(State(storage): State<Storage>) -> Json<HealthResponse> {
    let database = match storage.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Database ping failed: {e}");
            false
        }
    };

    let status = if database { "healthy" } else { "unhealthy" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}

/// Create health check routes
pub fn health_routes(storage: Storage) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(storage)
}
