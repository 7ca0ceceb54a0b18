//! Store for the `users` table.

use async_trait::async_trait;
use pethaven_core::error::CoreResult;
use pethaven_core::pagination::Page;
use pethaven_core::sorting::SortSpec;
use pethaven_core::types::DbId;

use super::PgStore;
use crate::error::{map_db_error, not_found};
use crate::models::user::{User, UserFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, city, \
    phone, about, is_moderator, is_deleted, deleted_at, created_at, updated_at";

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user, returning the created row.
    async fn create_user(&self, user: &User) -> CoreResult<User>;

    /// Find a live user by id.
    async fn find_user(&self, id: DbId) -> CoreResult<User>;

    /// Find a user by id, including soft-deleted rows.
    async fn find_user_include_deleted(&self, id: DbId) -> CoreResult<User>;

    /// Find a live user by username (case-sensitive).
    async fn find_user_by_username(&self, username: &str) -> CoreResult<Option<User>>;

    async fn list_users(&self, filter: &UserFilter, sort: &SortSpec, page: Page)
        -> CoreResult<Vec<User>>;

    /// Persist every mutable column of `user`.
    async fn update_user(&self, user: &User) -> CoreResult<User>;

    async fn soft_delete_user(&self, id: DbId) -> CoreResult<()>;
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: &User) -> CoreResult<User> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, first_name, last_name, \
                                city, phone, about, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, User>(&query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.city)
            .bind(&user.phone)
            .bind(&user.about)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_db_error)?;
        tracing::info!(user_id = created.id, username = %created.username, "User created");
        Ok(created)
    }

    async fn find_user(&self, id: DbId) -> CoreResult<User> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND is_deleted = false");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("User", id))
    }

    async fn find_user_include_deleted(&self, id: DbId) -> CoreResult<User> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("User", id))
    }

    async fn find_user_by_username(&self, username: &str) -> CoreResult<Option<User>> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE username = $1 AND is_deleted = false"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn list_users(
        &self,
        filter: &UserFilter,
        sort: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<User>> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE is_deleted = false
               AND ($1::text IS NULL OR city = $1)
             {}
             LIMIT $2 OFFSET $3",
            sort.order_by_clause("users")
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&filter.city)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn update_user(&self, user: &User) -> CoreResult<User> {
        let query = format!(
            "UPDATE users SET
                username = $2,
                email = $3,
                first_name = $4,
                last_name = $5,
                city = $6,
                phone = $7,
                about = $8,
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.city)
            .bind(&user.phone)
            .bind(&user.about)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("User", user.id))
    }

    async fn soft_delete_user(&self, id: DbId) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE users SET is_deleted = true, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(not_found("User", id));
        }
        tracing::info!(user_id = id, "User soft-deleted");
        Ok(())
    }
}
