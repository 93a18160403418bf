//! Taskdeck - per-user task list service.
//!
//! Users sign up and log in with username/password; passwords are stored as
//! bcrypt hashes and sessions are JWT bearer tokens. Tasks belong to exactly
//! one user and every operation is scoped to the authenticated owner. The
//! HTTP surface is a small axum application over SQLite.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod services;
pub mod storage;

pub use api::{build_router, ApiServer};
pub use config::AppConfig;
pub use error::{Error, Result};
