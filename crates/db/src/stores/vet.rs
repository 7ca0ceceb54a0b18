//! Store for the `vets` table.

use async_trait::async_trait;
use pethaven_core::error::CoreResult;
use pethaven_core::pagination::Page;
use pethaven_core::sorting::SortSpec;
use pethaven_core::types::DbId;

use super::PgStore;
use crate::error::{map_db_error, not_found};
use crate::models::vet::{Vet, VetFilter};

const COLUMNS: &str = "id, user_id, clinic_name, specialization, experience_years, price, \
    city, is_deleted, deleted_at, created_at, updated_at";

#[async_trait]
pub trait VetStore: Send + Sync {
    async fn create_vet(&self, vet: &Vet) -> CoreResult<Vet>;
    async fn find_vet(&self, id: DbId) -> CoreResult<Vet>;
    async fn find_vet_include_deleted(&self, id: DbId) -> CoreResult<Vet>;
    async fn find_vet_by_user(&self, user_id: DbId) -> CoreResult<Option<Vet>>;
    async fn list_vets(&self, filter: &VetFilter, sort: &SortSpec, page: Page)
        -> CoreResult<Vec<Vet>>;
    async fn update_vet(&self, vet: &Vet) -> CoreResult<Vet>;
    async fn soft_delete_vet(&self, id: DbId) -> CoreResult<()>;
}

#[async_trait]
impl VetStore for PgStore {
    async fn create_vet(&self, vet: &Vet) -> CoreResult<Vet> {
        let query = format!(
            "INSERT INTO vets (user_id, clinic_name, specialization, experience_years, price, \
                               city, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Vet>(&query)
            .bind(vet.user_id)
            .bind(&vet.clinic_name)
            .bind(&vet.specialization)
            .bind(vet.experience_years)
            .bind(vet.price)
            .bind(&vet.city)
            .bind(vet.created_at)
            .bind(vet.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_db_error)?;
        tracing::info!(vet_id = created.id, user_id = created.user_id, "Vet created");
        Ok(created)
    }

    async fn find_vet(&self, id: DbId) -> CoreResult<Vet> {
        let query = format!("SELECT {COLUMNS} FROM vets WHERE id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Vet>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Vet", id))
    }

    async fn find_vet_include_deleted(&self, id: DbId) -> CoreResult<Vet> {
        let query = format!("SELECT {COLUMNS} FROM vets WHERE id = $1");
        sqlx::query_as::<_, Vet>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Vet", id))
    }

    async fn find_vet_by_user(&self, user_id: DbId) -> CoreResult<Option<Vet>> {
        let query =
            format!("SELECT {COLUMNS} FROM vets WHERE user_id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Vet>(&query)
            .bind(user_id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn list_vets(
        &self,
        filter: &VetFilter,
        sort: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<Vet>> {
        let query = format!(
            "SELECT {COLUMNS} FROM vets
             WHERE is_deleted = false
               AND ($1::text IS NULL OR city = $1)
               AND ($2::text IS NULL OR specialization = $2)
             {}
             LIMIT $3 OFFSET $4",
            sort.order_by_clause("vets")
        );
        sqlx::query_as::<_, Vet>(&query)
            .bind(&filter.city)
            .bind(&filter.specialization)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn update_vet(&self, vet: &Vet) -> CoreResult<Vet> {
        let query = format!(
            "UPDATE vets SET
                clinic_name = $2,
                specialization = $3,
                experience_years = $4,
                price = $5,
                city = $6,
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vet>(&query)
            .bind(vet.id)
            .bind(&vet.clinic_name)
            .bind(&vet.specialization)
            .bind(vet.experience_years)
            .bind(vet.price)
            .bind(&vet.city)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Vet", vet.id))
    }

    async fn soft_delete_vet(&self, id: DbId) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE vets SET is_deleted = true, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(not_found("Vet", id));
        }
        Ok(())
    }
}
