//! Login, token refresh and logout.
//!
//! A refresh session is bound to the client fingerprint it was issued for.
//! Presenting a refresh token from another fingerprint revokes the session.

use chrono::{Duration, Utc};
use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::types::DbId;
use pethaven_db::models::session::RefreshSession;
use pethaven_db::models::user::{User, UserResponse};
use pethaven_db::stores::{SessionStore, UserStore};
use serde::Serialize;

use crate::auth::jwt::{
    generate_access_token, generate_refresh_token, hash_refresh_token, JwtConfig,
};
use crate::auth::password::verify_password;

/// Tokens returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

pub struct SessionService<'a, S> {
    store: &'a S,
    jwt: &'a JwtConfig,
}

fn invalid_credentials() -> CoreError {
    CoreError::Unauthorized("Invalid username or password".to_string())
}

impl<'a, S: UserStore + SessionStore> SessionService<'a, S> {
    pub fn new(store: &'a S, jwt: &'a JwtConfig) -> Self {
        Self { store, jwt }
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
        fingerprint: &str,
    ) -> CoreResult<AuthTokens> {
        let user = self
            .store
            .find_user_by_username(username)
            .await?
            .ok_or_else(invalid_credentials)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;
        if !valid {
            tracing::debug!(user_id = user.id, "Login rejected: wrong password");
            return Err(invalid_credentials());
        }

        let tokens = self.issue(user, fingerprint).await?;
        tracing::info!(user_id = tokens.user.id, "User logged in");
        Ok(tokens)
    }

    /// Rotate a refresh token. The old session is deleted before the new one
    /// is issued, so a token can be exchanged only once.
    pub async fn refresh(&self, refresh_token: &str, fingerprint: &str) -> CoreResult<AuthTokens> {
        let session = self
            .store
            .take_session_by_token_hash(&hash_refresh_token(refresh_token))
            .await?
            .ok_or_else(|| {
                CoreError::Unauthorized("Invalid or expired refresh token".to_string())
            })?;

        if session.fingerprint != fingerprint {
            tracing::warn!(
                user_id = session.user_id,
                session_id = session.id,
                "Refresh token presented from another fingerprint, session revoked"
            );
            return Err(CoreError::Unauthorized(
                "Session fingerprint mismatch".to_string(),
            ));
        }

        let user = self.store.find_user(session.user_id).await.map_err(|e| match e {
            CoreError::NotFound { .. } => {
                CoreError::Unauthorized("User no longer exists".to_string())
            }
            other => other,
        })?;
        self.issue(user, fingerprint).await
    }

    /// Revoke the caller's session on one device.
    pub async fn logout(&self, user_id: DbId, fingerprint: &str) -> CoreResult<()> {
        let removed = self
            .store
            .delete_session_for_fingerprint(user_id, fingerprint)
            .await?;
        tracing::info!(user_id, removed, "User logged out");
        Ok(())
    }

    async fn issue(&self, user: User, fingerprint: &str) -> CoreResult<AuthTokens> {
        let access_token = generate_access_token(user.id, user.is_moderator, self.jwt)
            .map_err(|e| CoreError::Internal(format!("Token generation error: {e}")))?;
        let (refresh_token, refresh_token_hash) = generate_refresh_token();

        let session = RefreshSession {
            user_id: user.id,
            refresh_token_hash,
            fingerprint: fingerprint.to_string(),
            expires_at: Utc::now() + Duration::days(self.jwt.refresh_token_expiry_days),
            ..RefreshSession::default()
        };
        self.store.upsert_session(&session).await?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            expires_in: self.jwt.access_token_expiry_mins * 60,
            user: user.into(),
        })
    }
}
