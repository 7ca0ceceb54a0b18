//! Store for the `keeper_reviews` table.
//!
//! Every mutation recomputes the reviewed keeper's `rating` inside the same
//! transaction, so the rating always equals the average of live grades.

use async_trait::async_trait;
use pethaven_core::error::CoreResult;
use pethaven_core::pagination::Page;
use pethaven_core::sorting::SortSpec;
use pethaven_core::types::DbId;

use super::PgStore;
use crate::error::{map_db_error, not_found};
use crate::models::review::KeeperReview;

const COLUMNS: &str = "id, keeper_id, author_id, grade, comment, \
    is_deleted, deleted_at, created_at, updated_at";

#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Insert a review for a live keeper. A missing keeper is `NotFound`.
    async fn create_review(&self, review: &KeeperReview) -> CoreResult<KeeperReview>;

    async fn find_review(&self, id: DbId) -> CoreResult<KeeperReview>;

    async fn find_review_include_deleted(&self, id: DbId) -> CoreResult<KeeperReview>;

    async fn list_reviews_for_keeper(
        &self,
        keeper_id: DbId,
        sort: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<KeeperReview>>;

    async fn update_review(&self, review: &KeeperReview) -> CoreResult<KeeperReview>;

    async fn soft_delete_review(&self, id: DbId) -> CoreResult<()>;
}

impl PgStore {
    /// Set `keepers.rating` to the average live grade (0 without reviews).
    async fn recompute_rating(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        keeper_id: DbId,
    ) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE keepers SET
                rating = COALESCE(
                    (SELECT AVG(grade)::float8 FROM keeper_reviews
                     WHERE keeper_id = $1 AND is_deleted = false),
                    0),
                updated_at = NOW()
             WHERE id = $1
             RETURNING rating",
        )
        .bind(keeper_id)
        .fetch_one(&mut **tx)
        .await
    }
}

#[async_trait]
impl ReviewStore for PgStore {
    async fn create_review(&self, review: &KeeperReview) -> CoreResult<KeeperReview> {
        let mut tx = self.pool().begin().await.map_err(map_db_error)?;

        // Lock the keeper so concurrent reviews recompute the rating in order.
        let keeper: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM keepers WHERE id = $1 AND is_deleted = false FOR UPDATE",
        )
        .bind(review.keeper_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;
        if keeper.is_none() {
            return Err(not_found("Keeper", review.keeper_id));
        }

        let query = format!(
            "INSERT INTO keeper_reviews (keeper_id, author_id, grade, comment, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, KeeperReview>(&query)
            .bind(review.keeper_id)
            .bind(review.author_id)
            .bind(review.grade)
            .bind(&review.comment)
            .bind(review.created_at)
            .bind(review.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let rating = Self::recompute_rating(&mut tx, created.keeper_id)
            .await
            .map_err(map_db_error)?;
        tx.commit().await.map_err(map_db_error)?;

        tracing::info!(
            review_id = created.id,
            keeper_id = created.keeper_id,
            author_id = created.author_id,
            rating,
            "Review created"
        );
        Ok(created)
    }

    async fn find_review(&self, id: DbId) -> CoreResult<KeeperReview> {
        let query = format!(
            "SELECT {COLUMNS} FROM keeper_reviews WHERE id = $1 AND is_deleted = false"
        );
        sqlx::query_as::<_, KeeperReview>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Review", id))
    }

    async fn find_review_include_deleted(&self, id: DbId) -> CoreResult<KeeperReview> {
        let query = format!("SELECT {COLUMNS} FROM keeper_reviews WHERE id = $1");
        sqlx::query_as::<_, KeeperReview>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Review", id))
    }

    async fn list_reviews_for_keeper(
        &self,
        keeper_id: DbId,
        sort: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<KeeperReview>> {
        let query = format!(
            "SELECT {COLUMNS} FROM keeper_reviews
             WHERE keeper_id = $1 AND is_deleted = false
             {}
             LIMIT $2 OFFSET $3",
            sort.order_by_clause("keeper_reviews")
        );
        sqlx::query_as::<_, KeeperReview>(&query)
            .bind(keeper_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn update_review(&self, review: &KeeperReview) -> CoreResult<KeeperReview> {
        let mut tx = self.pool().begin().await.map_err(map_db_error)?;

        let query = format!(
            "UPDATE keeper_reviews SET
                grade = $2,
                comment = $3,
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, KeeperReview>(&query)
            .bind(review.id)
            .bind(review.grade)
            .bind(&review.comment)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Review", review.id))?;

        Self::recompute_rating(&mut tx, updated.keeper_id)
            .await
            .map_err(map_db_error)?;
        tx.commit().await.map_err(map_db_error)?;
        Ok(updated)
    }

    async fn soft_delete_review(&self, id: DbId) -> CoreResult<()> {
        let mut tx = self.pool().begin().await.map_err(map_db_error)?;

        let keeper_id: DbId = sqlx::query_scalar(
            "UPDATE keeper_reviews SET is_deleted = true, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = false
             RETURNING keeper_id",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| not_found("Review", id))?;

        Self::recompute_rating(&mut tx, keeper_id)
            .await
            .map_err(map_db_error)?;
        tx.commit().await.map_err(map_db_error)?;

        tracing::info!(review_id = id, keeper_id, "Review soft-deleted");
        Ok(())
    }
}
