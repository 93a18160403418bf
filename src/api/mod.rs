//! REST API for the task service.
//!
//! Public surface: signup/login/health. Everything else requires a bearer
//! token verified by the auth middleware.

pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use server::{build_router, ApiServer};
