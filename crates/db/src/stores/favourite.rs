//! Store for the `favourite_keepers` junction table.

use async_trait::async_trait;
use pethaven_core::error::CoreResult;
use pethaven_core::pagination::Page;
use pethaven_core::types::DbId;

use super::PgStore;
use crate::error::{map_db_error, not_found};
use crate::models::favourite::FavouriteKeeper;
use crate::models::keeper::Keeper;

const KEEPER_COLUMNS: &str = "k.id, k.user_id, k.description, k.price, k.has_cage, \
    k.boarding_capacity, k.animal_types, k.city, k.rating, k.is_deleted, k.deleted_at, \
    k.created_at, k.updated_at";

#[async_trait]
pub trait FavouriteStore: Send + Sync {
    /// Mark a keeper as a favourite of `user_id`. Adding an existing
    /// favourite returns the original row.
    async fn add_favourite(&self, user_id: DbId, keeper_id: DbId) -> CoreResult<FavouriteKeeper>;

    /// Hard-delete a favourite. `NotFound` when it does not exist.
    async fn remove_favourite(&self, user_id: DbId, keeper_id: DbId) -> CoreResult<()>;

    /// Live keepers favourited by `user_id`, most recently added first.
    async fn list_favourite_keepers(&self, user_id: DbId, page: Page) -> CoreResult<Vec<Keeper>>;
}

#[async_trait]
impl FavouriteStore for PgStore {
    async fn add_favourite(&self, user_id: DbId, keeper_id: DbId) -> CoreResult<FavouriteKeeper> {
        let mut tx = self.pool().begin().await.map_err(map_db_error)?;

        let keeper: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM keepers WHERE id = $1 AND is_deleted = false")
                .bind(keeper_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;
        if keeper.is_none() {
            return Err(not_found("Keeper", keeper_id));
        }

        sqlx::query(
            "INSERT INTO favourite_keepers (user_id, keeper_id) VALUES ($1, $2)
             ON CONFLICT (user_id, keeper_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(keeper_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let favourite = sqlx::query_as::<_, FavouriteKeeper>(
            "SELECT user_id, keeper_id, created_at FROM favourite_keepers
             WHERE user_id = $1 AND keeper_id = $2",
        )
        .bind(user_id)
        .bind(keeper_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        tracing::debug!(user_id, keeper_id, "Favourite added");
        Ok(favourite)
    }

    async fn remove_favourite(&self, user_id: DbId, keeper_id: DbId) -> CoreResult<()> {
        let result =
            sqlx::query("DELETE FROM favourite_keepers WHERE user_id = $1 AND keeper_id = $2")
                .bind(user_id)
                .bind(keeper_id)
                .execute(self.pool())
                .await
                .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(not_found("Favourite", keeper_id));
        }
        tracing::debug!(user_id, keeper_id, "Favourite removed");
        Ok(())
    }

    async fn list_favourite_keepers(&self, user_id: DbId, page: Page) -> CoreResult<Vec<Keeper>> {
        let query = format!(
            "SELECT {KEEPER_COLUMNS}
             FROM favourite_keepers f
             JOIN keepers k ON k.id = f.keeper_id
             WHERE f.user_id = $1 AND k.is_deleted = false
             ORDER BY f.created_at DESC, k.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Keeper>(&query)
            .bind(user_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)
    }
}
