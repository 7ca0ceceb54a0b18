//! Store for the `posts` table.

use async_trait::async_trait;
use pethaven_core::error::CoreResult;
use pethaven_core::pagination::Page;
use pethaven_core::sorting::SortSpec;
use pethaven_core::types::DbId;

use super::PgStore;
use crate::error::{map_db_error, not_found};
use crate::models::post::{Post, PostFilter};

pub(crate) const COLUMNS: &str = "id, author_id, title, body, animal_type, city, status, \
    reports_count, is_deleted, deleted_at, created_at, updated_at";

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create_post(&self, post: &Post) -> CoreResult<Post>;

    async fn find_post(&self, id: DbId) -> CoreResult<Post>;

    async fn find_post_include_deleted(&self, id: DbId) -> CoreResult<Post>;

    /// List live posts. When `filter.visible_to` is set only published posts
    /// and that user's own posts are returned.
    async fn list_posts(&self, filter: &PostFilter, sort: &SortSpec, page: Page)
        -> CoreResult<Vec<Post>>;

    /// Persist content and status. `reports_count` is owned by the report
    /// store and is never written here.
    async fn update_post(&self, post: &Post) -> CoreResult<Post>;

    async fn soft_delete_post(&self, id: DbId) -> CoreResult<()>;
}

#[async_trait]
impl PostStore for PgStore {
    async fn create_post(&self, post: &Post) -> CoreResult<Post> {
        let query = format!(
            "INSERT INTO posts (author_id, title, body, animal_type, city, status, \
                                created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Post>(&query)
            .bind(post.author_id)
            .bind(&post.title)
            .bind(&post.body)
            .bind(&post.animal_type)
            .bind(&post.city)
            .bind(&post.status)
            .bind(post.created_at)
            .bind(post.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_db_error)?;
        tracing::info!(post_id = created.id, author_id = created.author_id, "Post created");
        Ok(created)
    }

    async fn find_post(&self, id: DbId) -> CoreResult<Post> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Post", id))
    }

    async fn find_post_include_deleted(&self, id: DbId) -> CoreResult<Post> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Post", id))
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        sort: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<Post>> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts
             WHERE is_deleted = false
               AND ($1::bigint IS NULL OR author_id = $1)
               AND ($2::text IS NULL OR status = $2)
               AND ($3::text IS NULL OR city = $3)
               AND ($4::text IS NULL OR animal_type = $4)
               AND ($5::bigint IS NULL OR status = 'published' OR author_id = $5)
             {}
             LIMIT $6 OFFSET $7",
            sort.order_by_clause("posts")
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(filter.author_id)
            .bind(&filter.status)
            .bind(&filter.city)
            .bind(&filter.animal_type)
            .bind(filter.visible_to)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn update_post(&self, post: &Post) -> CoreResult<Post> {
        let query = format!(
            "UPDATE posts SET
                title = $2,
                body = $3,
                animal_type = $4,
                city = $5,
                status = $6,
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(post.id)
            .bind(&post.title)
            .bind(&post.body)
            .bind(&post.animal_type)
            .bind(&post.city)
            .bind(&post.status)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Post", post.id))
    }

    async fn soft_delete_post(&self, id: DbId) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE posts SET is_deleted = true, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(not_found("Post", id));
        }
        tracing::info!(post_id = id, "Post soft-deleted");
        Ok(())
    }
}
