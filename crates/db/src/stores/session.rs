//! Store for the `refresh_sessions` table.

use async_trait::async_trait;
use pethaven_core::error::CoreResult;
use pethaven_core::types::DbId;

use super::PgStore;
use crate::error::map_db_error;
use crate::models::session::RefreshSession;

const COLUMNS: &str = "id, user_id, refresh_token_hash, fingerprint, expires_at, created_at";

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create the session for `(user_id, fingerprint)` or replace the token
    /// of the existing one.
    async fn upsert_session(&self, session: &RefreshSession) -> CoreResult<RefreshSession>;

    /// Find an unexpired session by refresh token hash.
    async fn find_session_by_token_hash(&self, hash: &str) -> CoreResult<Option<RefreshSession>>;

    /// Delete and return the unexpired session holding `hash`. Of several
    /// concurrent callers with the same hash at most one gets the row.
    async fn take_session_by_token_hash(&self, hash: &str) -> CoreResult<Option<RefreshSession>>;

    /// Delete the session a user holds on one device. Returns whether a row
    /// was removed.
    async fn delete_session_for_fingerprint(
        &self,
        user_id: DbId,
        fingerprint: &str,
    ) -> CoreResult<bool>;
}

#[async_trait]
impl SessionStore for PgStore {
    async fn upsert_session(&self, session: &RefreshSession) -> CoreResult<RefreshSession> {
        let query = format!(
            "INSERT INTO refresh_sessions (user_id, refresh_token_hash, fingerprint, expires_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, fingerprint) DO UPDATE SET
                refresh_token_hash = EXCLUDED.refresh_token_hash,
                expires_at = EXCLUDED.expires_at,
                created_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(session.user_id)
            .bind(&session.refresh_token_hash)
            .bind(&session.fingerprint)
            .bind(session.expires_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn find_session_by_token_hash(&self, hash: &str) -> CoreResult<Option<RefreshSession>> {
        let query = format!(
            "SELECT {COLUMNS} FROM refresh_sessions
             WHERE refresh_token_hash = $1 AND expires_at > NOW()"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(hash)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn take_session_by_token_hash(&self, hash: &str) -> CoreResult<Option<RefreshSession>> {
        let query = format!(
            "DELETE FROM refresh_sessions
             WHERE refresh_token_hash = $1 AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(hash)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn delete_session_for_fingerprint(
        &self,
        user_id: DbId,
        fingerprint: &str,
    ) -> CoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM refresh_sessions WHERE user_id = $1 AND fingerprint = $2")
                .bind(user_id)
                .bind(fingerprint)
                .execute(self.pool())
                .await
                .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }
}
