//! HTTP route handlers.

pub mod auth;
pub mod health;
pub mod tasks;

pub use auth::{auth_routes, session_routes};
pub use health::health_routes;
pub use tasks::task_routes;
