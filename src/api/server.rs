//! HTTP server assembly.
//!
//! Wires storage, services, and middleware into an axum router and serves it.
//! The router builder is public so tests can drive the full stack in-process.

use super::middleware::{cors_layer, AuthMiddleware, AuthState};
use super::routes::{auth_routes, health_routes, session_routes, task_routes};
use crate::auth::TokenIssuer;
use crate::config::AppConfig;
use crate::services::{AuthService, TaskService};
use crate::storage::Storage;
use anyhow::{Context, Result};
use axum::{middleware, Router};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

/// HTTP server for the task service.
pub struct ApiServer {
    config: AppConfig,
    storage: Storage,
}

impl ApiServer {
    /// Connect to storage (creating the schema if needed) and prepare the
    /// server. All state is built here once and injected into the router;
    /// there are no process-wide singletons.
    pub async fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing API server");

        let storage = Storage::connect(&config.database_url)
            .await
            .context("Failed to open database")?;

        Ok(Self { config, storage })
    }

    /// Start serving and run until the process is stopped.
    pub async fn serve(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let socket_addr: SocketAddr = addr.parse().context("Failed to parse socket address")?;

        let app = build_router(self.storage, &self.config);

        let listener = tokio::net::TcpListener::bind(&socket_addr)
            .await
            .context("Failed to bind to address")?;

        info!("Listening on http://{}", addr);
        info!("Endpoints:");
        info!("  POST   /signup       - Register (no auth)");
        info!("  POST   /login        - Log in (no auth)");
        info!("  GET    /health       - Health check (no auth)");
        info!("  GET    /me           - Current user");
        info!("  GET    /tasks        - List tasks (page, per_page)");
        info!("  POST   /tasks        - Create task");
        info!("  PATCH  /tasks/{{id}}   - Update task");
        info!("  DELETE /tasks/{{id}}   - Delete task");
        info!("Authentication: Bearer <token>");

        axum::serve(listener, app).await.context("Server error")?;

        Ok(())
    }
}

/// Build the application router over an already-connected storage handle.
pub fn build_router(storage: Storage, config: &AppConfig) -> Router {
    let tokens = TokenIssuer::new(config.jwt_secret.clone(), config.token_expiry_minutes);

    let auth_service = AuthService::new(storage.clone(), tokens.clone(), config.min_password_len);
    let task_service = TaskService::new(storage.clone());
    let auth_state = AuthState::new(tokens);

    let public_routes = Router::new()
        .merge(health_routes(storage))
        .merge(auth_routes(auth_service.clone()));

    let protected_routes = Router::new()
        .merge(session_routes(auth_service))
        .merge(task_routes(task_service))
        .route_layer(middleware::from_fn(move |req, next| {
            let auth_state = auth_state.clone();
            async move { AuthMiddleware::validate(auth_state, req, next).await }
        }));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
}
