//! Store for the `seekers` table.

use async_trait::async_trait;
use pethaven_core::error::CoreResult;
use pethaven_core::pagination::Page;
use pethaven_core::sorting::SortSpec;
use pethaven_core::types::DbId;

use super::PgStore;
use crate::error::{map_db_error, not_found};
use crate::models::seeker::{Seeker, SeekerFilter};

const COLUMNS: &str = "id, user_id, description, animal_type, city, \
    is_deleted, deleted_at, created_at, updated_at";

#[async_trait]
pub trait SeekerStore: Send + Sync {
    async fn create_seeker(&self, seeker: &Seeker) -> CoreResult<Seeker>;
    async fn find_seeker(&self, id: DbId) -> CoreResult<Seeker>;
    async fn find_seeker_include_deleted(&self, id: DbId) -> CoreResult<Seeker>;
    async fn find_seeker_by_user(&self, user_id: DbId) -> CoreResult<Option<Seeker>>;
    async fn list_seekers(
        &self,
        filter: &SeekerFilter,
        sort: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<Seeker>>;
    async fn update_seeker(&self, seeker: &Seeker) -> CoreResult<Seeker>;
    async fn soft_delete_seeker(&self, id: DbId) -> CoreResult<()>;
}

#[async_trait]
impl SeekerStore for PgStore {
    async fn create_seeker(&self, seeker: &Seeker) -> CoreResult<Seeker> {
        let query = format!(
            "INSERT INTO seekers (user_id, description, animal_type, city, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Seeker>(&query)
            .bind(seeker.user_id)
            .bind(&seeker.description)
            .bind(&seeker.animal_type)
            .bind(&seeker.city)
            .bind(seeker.created_at)
            .bind(seeker.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_db_error)?;
        tracing::info!(seeker_id = created.id, user_id = created.user_id, "Seeker created");
        Ok(created)
    }

    async fn find_seeker(&self, id: DbId) -> CoreResult<Seeker> {
        let query = format!("SELECT {COLUMNS} FROM seekers WHERE id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Seeker>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Seeker", id))
    }

    async fn find_seeker_include_deleted(&self, id: DbId) -> CoreResult<Seeker> {
        let query = format!("SELECT {COLUMNS} FROM seekers WHERE id = $1");
        sqlx::query_as::<_, Seeker>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Seeker", id))
    }

    async fn find_seeker_by_user(&self, user_id: DbId) -> CoreResult<Option<Seeker>> {
        let query = format!(
            "SELECT {COLUMNS} FROM seekers WHERE user_id = $1 AND is_deleted = false"
        );
        sqlx::query_as::<_, Seeker>(&query)
            .bind(user_id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn list_seekers(
        &self,
        filter: &SeekerFilter,
        sort: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<Seeker>> {
        let query = format!(
            "SELECT {COLUMNS} FROM seekers
             WHERE is_deleted = false
               AND ($1::text IS NULL OR city = $1)
               AND ($2::text IS NULL OR animal_type = $2)
             {}
             LIMIT $3 OFFSET $4",
            sort.order_by_clause("seekers")
        );
        sqlx::query_as::<_, Seeker>(&query)
            .bind(&filter.city)
            .bind(&filter.animal_type)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn update_seeker(&self, seeker: &Seeker) -> CoreResult<Seeker> {
        let query = format!(
            "UPDATE seekers SET
                description = $2,
                animal_type = $3,
                city = $4,
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seeker>(&query)
            .bind(seeker.id)
            .bind(&seeker.description)
            .bind(&seeker.animal_type)
            .bind(&seeker.city)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Seeker", seeker.id))
    }

    async fn soft_delete_seeker(&self, id: DbId) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE seekers SET is_deleted = true, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(not_found("Seeker", id));
        }
        Ok(())
    }
}
