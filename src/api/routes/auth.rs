//! Authentication routes: signup, login, and session check.

use crate::api::error::ApiError;
use crate::api::extract::Json;
use crate::api::middleware::CurrentUser;
use crate::error::Error;
use crate::services::{AuthService, AuthenticatedUser, UserView};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

/// Signup/login request body. Fields are optional so a missing field gets the
/// domain's validation response instead of a deserializer rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /signup - Register a new user and log them in
async fn signup(
    State(service): State<AuthService>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    // The signup contract reports every rejection as 422, validation included.
    let authed: AuthenticatedUser = service
        .signup(&username, &password)
        .await
        .map_err(|e| match e {
            Error::Validation(msg) => ApiError::UnprocessableEntity(msg),
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(authed)))
}

/// POST /login - Authenticate and issue a fresh token
async fn login(
    State(service): State<AuthService>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<AuthenticatedUser>, ApiError> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let authed = service.login(&username, &password).await?;

    Ok(Json(authed))
}

/// GET /me - Current user for a valid session token
async fn me(
    State(service): State<AuthService>,
    current: CurrentUser,
) -> Result<Json<UserView>, ApiError> {
    let user = service.user_by_id(&current.id).await?;
    Ok(Json(user))
}

/// Public authentication routes (no token required).
pub fn auth_routes(service: AuthService) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .with_state(service)
}

/// Session-check route; mounted behind the auth middleware.
pub fn session_routes(service: AuthService) -> Router {
    Router::new().route("/me", get(me)).with_state(service)
}
