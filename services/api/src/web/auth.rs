//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for registration, sign-in, sign-out and the
//! current-session probe.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use story_hub_core::{accounts, Credentials, Principal, SessionToken, User};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::{
    error::{ErrorBody, HttpError},
    middleware::{identify, SESSION_COOKIE},
    parse_json,
    state::AppState,
};

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// Shared by registration and sign-in. Both fields are optional on the wire
/// so that a missing field is reported as such rather than as bad JSON.
#[derive(Deserialize, ToSchema)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public fields of a user account.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub email: String,
}

impl From<Principal> for AuthResponse {
    fn from(principal: Principal) -> Self {
        Self {
            user_id: principal.user_id,
            email: principal.email,
        }
    }
}

fn session_cookie(state: &AppState, token: &SessionToken) -> String {
    let max_age = (token.expires_at - Utc::now()).num_seconds().max(0);
    let secure = if state.config.session_cookie_secure { " Secure;" } else { "" };
    format!(
        "{}={}; HttpOnly;{} SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token.value, secure, max_age
    )
}

fn cleared_cookie(state: &AppState) -> String {
    let secure = if state.config.session_cookie_secure { " Secure;" } else { "" };
    format!("{}=; HttpOnly;{} SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE, secure)
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/auth/register - Create a new password account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Missing fields, invalid JSON or duplicate email", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<UserResponse>, HttpError> {
    let req: CredentialsRequest = parse_json(&body)?;
    let credentials = Credentials::from_parts(req.email, req.password)?;

    let user = accounts::register(
        state.db.as_ref(),
        state.passwords.as_ref(),
        credentials,
    )
    .await?;

    Ok(Json(user.into()))
}

/// POST /api/auth/login - Sign in and receive a session cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let req: CredentialsRequest = parse_json(&body)?;
    // Missing fields fail the same way as a wrong password.
    let credentials = Credentials::from_parts(req.email, req.password)
        .map_err(|_| HttpError::InvalidCredentials)?;

    let principal = accounts::authenticate(
        state.db.as_ref(),
        state.passwords.as_ref(),
        &credentials,
    )
    .await?
    .ok_or(HttpError::InvalidCredentials)?;

    let token = state.sessions.issue(&principal)?;
    info!(user_id = %principal.user_id, "user signed in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&state, &token))],
        Json(AuthResponse::from(principal)),
    ))
}

/// POST /api/auth/logout - Clear the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout successful")
    )
)]
pub async fn logout_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, [(header::SET_COOKIE, cleared_cookie(&state))])
}

/// GET /api/auth/session - Who the current session belongs to
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "An active session", body = AuthResponse),
        (status = 401, description = "No active session", body = ErrorBody)
    )
)]
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AuthResponse>, HttpError> {
    let principal = identify(&state, &headers).ok_or(HttpError::Unauthorized)?;
    Ok(Json(principal.into()))
}
