//! Handlers for the `/auth` resource (register, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use pethaven_db::models::user::{RegisterUser, UserResponse};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ValidJson;
use crate::response::ApiResponse;
use crate::services::session::{AuthTokens, SessionService};
use crate::services::user::UserService;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// Client device fingerprint the refresh session is bound to.
    #[validate(length(min = 1, max = 255))]
    pub fingerprint: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
    #[validate(length(min = 1, max = 255))]
    pub fingerprint: String,
}

/// Request body for `POST /auth/logout`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LogoutRequest {
    #[validate(length(min = 1, max = 255))]
    pub fingerprint: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RegisterUser>,
) -> AppResult<impl IntoResponse> {
    let user = UserService::new(&state.store).register(&input).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, ApiResponse::ok(UserResponse::from(user))))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<ApiResponse<AuthTokens>> {
    let tokens = SessionService::new(&state.store, &state.config.jwt)
        .login(&input.username, &input.password, &input.fingerprint)
        .await?;
    Ok(ApiResponse::ok(tokens))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RefreshRequest>,
) -> AppResult<ApiResponse<AuthTokens>> {
    let tokens = SessionService::new(&state.store, &state.config.jwt)
        .refresh(&input.refresh_token, &input.fingerprint)
        .await?;
    Ok(ApiResponse::ok(tokens))
}

/// POST /api/v1/auth/logout
///
/// End the session of the given device. Returns 204 No Content.
pub async fn logout(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LogoutRequest>,
) -> AppResult<StatusCode> {
    SessionService::new(&state.store, &state.config.jwt)
        .logout(auth.user_id, &input.fingerprint)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
