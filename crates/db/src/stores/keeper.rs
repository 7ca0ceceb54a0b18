//! Store for the `keepers` table.

use async_trait::async_trait;
use pethaven_core::error::CoreResult;
use pethaven_core::pagination::Page;
use pethaven_core::sorting::SortSpec;
use pethaven_core::types::DbId;

use super::PgStore;
use crate::error::{map_db_error, not_found};
use crate::models::keeper::{Keeper, KeeperFilter};

const COLUMNS: &str = "id, user_id, description, price, has_cage, boarding_capacity, \
    animal_types, city, rating, is_deleted, deleted_at, created_at, updated_at";

#[async_trait]
pub trait KeeperStore: Send + Sync {
    async fn create_keeper(&self, keeper: &Keeper) -> CoreResult<Keeper>;

    async fn find_keeper(&self, id: DbId) -> CoreResult<Keeper>;

    async fn find_keeper_include_deleted(&self, id: DbId) -> CoreResult<Keeper>;

    /// The live keeper profile of a user, if any.
    async fn find_keeper_by_user(&self, user_id: DbId) -> CoreResult<Option<Keeper>>;

    async fn list_keepers(
        &self,
        filter: &KeeperFilter,
        sort: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<Keeper>>;

    /// Persist the editable columns. `rating` is owned by the review store
    /// and is never written here.
    async fn update_keeper(&self, keeper: &Keeper) -> CoreResult<Keeper>;

    async fn soft_delete_keeper(&self, id: DbId) -> CoreResult<()>;
}

#[async_trait]
impl KeeperStore for PgStore {
    async fn create_keeper(&self, keeper: &Keeper) -> CoreResult<Keeper> {
        let query = format!(
            "INSERT INTO keepers (user_id, description, price, has_cage, boarding_capacity, \
                                  animal_types, city, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Keeper>(&query)
            .bind(keeper.user_id)
            .bind(&keeper.description)
            .bind(keeper.price)
            .bind(keeper.has_cage)
            .bind(keeper.boarding_capacity)
            .bind(&keeper.animal_types)
            .bind(&keeper.city)
            .bind(keeper.created_at)
            .bind(keeper.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_db_error)?;
        tracing::info!(keeper_id = created.id, user_id = created.user_id, "Keeper created");
        Ok(created)
    }

    async fn find_keeper(&self, id: DbId) -> CoreResult<Keeper> {
        let query = format!("SELECT {COLUMNS} FROM keepers WHERE id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Keeper>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Keeper", id))
    }

    async fn find_keeper_include_deleted(&self, id: DbId) -> CoreResult<Keeper> {
        let query = format!("SELECT {COLUMNS} FROM keepers WHERE id = $1");
        sqlx::query_as::<_, Keeper>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Keeper", id))
    }

    async fn find_keeper_by_user(&self, user_id: DbId) -> CoreResult<Option<Keeper>> {
        let query = format!(
            "SELECT {COLUMNS} FROM keepers WHERE user_id = $1 AND is_deleted = false"
        );
        sqlx::query_as::<_, Keeper>(&query)
            .bind(user_id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn list_keepers(
        &self,
        filter: &KeeperFilter,
        sort: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<Keeper>> {
        let query = format!(
            "SELECT {COLUMNS} FROM keepers
             WHERE is_deleted = false
               AND ($1::text IS NULL OR city = $1)
               AND ($2::bool IS NULL OR has_cage = $2)
               AND ($3::float8 IS NULL OR rating >= $3)
             {}
             LIMIT $4 OFFSET $5",
            sort.order_by_clause("keepers")
        );
        sqlx::query_as::<_, Keeper>(&query)
            .bind(&filter.city)
            .bind(filter.has_cage)
            .bind(filter.min_rating)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn update_keeper(&self, keeper: &Keeper) -> CoreResult<Keeper> {
        let query = format!(
            "UPDATE keepers SET
                description = $2,
                price = $3,
                has_cage = $4,
                boarding_capacity = $5,
                animal_types = $6,
                city = $7,
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Keeper>(&query)
            .bind(keeper.id)
            .bind(&keeper.description)
            .bind(keeper.price)
            .bind(keeper.has_cage)
            .bind(keeper.boarding_capacity)
            .bind(&keeper.animal_types)
            .bind(&keeper.city)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Keeper", keeper.id))
    }

    async fn soft_delete_keeper(&self, id: DbId) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE keepers SET is_deleted = true, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(not_found("Keeper", id));
        }
        tracing::info!(keeper_id = id, "Keeper soft-deleted");
        Ok(())
    }
}
