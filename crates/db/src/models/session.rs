//! Refresh session model.

use pethaven_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `refresh_sessions` table.
///
/// A session is bound to one client fingerprint; a user holds at most one
/// session per fingerprint. Only the SHA-256 hash of the refresh token is
/// stored.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct RefreshSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub fingerprint: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}
