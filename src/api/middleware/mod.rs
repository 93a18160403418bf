//! API middleware

pub mod auth;
pub mod cors;

pub use auth::{AuthMiddleware, AuthState, CurrentUser};
pub use cors::cors_layer;
