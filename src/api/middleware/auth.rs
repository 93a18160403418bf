//! Authentication middleware.
//!
//! Verifies the bearer token on protected routes and stashes the
//! authenticated user id in the request extensions, where the [`CurrentUser`]
//! extractor picks it up.

use crate::api::error::ApiError;
use crate::auth::TokenIssuer;
use axum::{
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: TokenIssuer,
}

impl AuthState {
    pub fn new(tokens: TokenIssuer) -> Self {
        Self { tokens }
    }
}

/// The authenticated caller, extracted from a verified token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

/// Authentication middleware.
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Validate the bearer token and forward the request with the caller's
    /// identity attached. Missing, malformed, and failed tokens all get 401.
    pub async fn validate(
        state: AuthState,
        mut req: Request,
        next: Next,
    ) -> Result<Response, ApiError> {
        let auth_header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        if let Some(auth_header) = auth_header {
            if let Some(token) = auth_header.strip_prefix("Bearer ") {
                return match state.tokens.verify(token) {
                    Ok(user_id) => {
                        req.extensions_mut().insert(CurrentUser { id: user_id });
                        Ok(next.run(req).await)
                    }
                    Err(e) => Err(ApiError::Unauthorized(e.to_string())),
                };
            }
        }

        Err(ApiError::Unauthorized("Not authorized".to_string()))
    }
}

/// Extractor for authenticated requests.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Not authorized".to_string()));

        async move { result }
    }
}
