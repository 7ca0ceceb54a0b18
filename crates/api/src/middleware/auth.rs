//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use pethaven_core::error::CoreError;
use pethaven_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::services::post::Viewer;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// The user id is the context injected into every converter that builds an
/// owned record:
///
/// ```ignore
/// async fn create(user: AuthUser, ValidJson(input): ValidJson<CreatePost>) -> AppResult<...> {
///     let record = input.to_domain(user.user_id);
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub is_moderator: bool,
}

impl AuthUser {
    /// The caller as a post reader.
    pub fn viewer(&self) -> Viewer {
        Viewer {
            user_id: self.user_id,
            is_moderator: self.is_moderator,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            is_moderator: claims.moderator,
        })
    }
}
