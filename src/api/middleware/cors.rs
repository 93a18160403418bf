//! CORS policy.
//!
//! The API is stateless bearer-token auth with no cookies, so browsers gain
//! nothing from a tight origin list. Every endpoint is open to any origin.

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS layer applied to the whole router.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
