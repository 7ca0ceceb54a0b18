//! Moderator-only operations on reported posts.

use async_trait::async_trait;
use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::pagination::Page;
use pethaven_core::post_status::PostStatus;
use pethaven_core::types::DbId;

use super::post::COLUMNS;
use super::PgStore;
use crate::error::{map_db_error, not_found};
use crate::models::post::Post;

#[async_trait]
pub trait ModerationStore: Send + Sync {
    /// Live posts with at least one report, most reported first.
    async fn moderation_queue(&self, page: Page) -> CoreResult<Vec<Post>>;

    /// Clear all reports of a post and publish it. Only a blocked or
    /// reported post can be approved; anything else is `Validation`.
    async fn approve_post(&self, post_id: DbId) -> CoreResult<Post>;

    async fn block_post(&self, post_id: DbId) -> CoreResult<Post>;
}

#[async_trait]
impl ModerationStore for PgStore {
    async fn moderation_queue(&self, page: Page) -> CoreResult<Vec<Post>> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts
             WHERE is_deleted = false AND reports_count > 0
             ORDER BY reports_count DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn approve_post(&self, post_id: DbId) -> CoreResult<Post> {
        let mut tx = self.pool().begin().await.map_err(map_db_error)?;

        let locked: Option<(String, i32)> = sqlx::query_as(
            "SELECT status, reports_count FROM posts
             WHERE id = $1 AND is_deleted = false
             FOR UPDATE",
        )
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;
        let Some((status, reports_count)) = locked else {
            return Err(not_found("Post", post_id));
        };
        if status != PostStatus::Blocked.as_str() && reports_count == 0 {
            return Err(CoreError::Validation(format!(
                "Post {post_id} is {status} with no reports; nothing to approve"
            )));
        }

        let removed = sqlx::query("DELETE FROM reports WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        let query = format!(
            "UPDATE posts SET reports_count = 0, status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(post_id)
            .bind(PostStatus::Published.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        tracing::info!(post_id, reports_removed = removed, "Post approved");
        Ok(post)
    }

    async fn block_post(&self, post_id: DbId) -> CoreResult<Post> {
        let query = format!(
            "UPDATE posts SET status = $2, updated_at = NOW()
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(post_id)
            .bind(PostStatus::Blocked.as_str())
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Post", post_id))?;
        tracing::info!(post_id, "Post blocked");
        Ok(post)
    }
}
