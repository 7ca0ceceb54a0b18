//! Vet profiles.

use chrono::Utc;
use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::pagination::Page;
use pethaven_core::sorting::{resolve_sort, SortDefaults};
use pethaven_core::types::DbId;
use pethaven_db::models::vet::{CreateVet, UpdateVet, Vet, VetFilter, VET_SORT_FIELDS};
use pethaven_db::stores::VetStore;

use super::{ensure_owner, stamp};

pub struct VetService<'a, S> {
    store: &'a S,
}

impl<'a, S: VetStore> VetService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn create(&self, actor: DbId, input: &CreateVet) -> CoreResult<Vet> {
        if self.store.find_vet_by_user(actor).await?.is_some() {
            return Err(CoreError::Conflict(
                "User already has a vet profile".to_string(),
            ));
        }
        let mut vet = input.to_domain(actor);
        stamp(&mut vet.created_at, &mut vet.updated_at);
        self.store.create_vet(&vet).await
    }

    pub async fn get_by_id(&self, id: DbId) -> CoreResult<Vet> {
        self.store.find_vet(id).await
    }

    pub async fn list(
        &self,
        filter: &VetFilter,
        sort: Option<&str>,
        page: Page,
        defaults: &SortDefaults,
    ) -> CoreResult<Vec<Vet>> {
        let sort = resolve_sort(sort, VET_SORT_FIELDS, defaults)?;
        self.store.list_vets(filter, &sort, page).await
    }

    pub async fn update(&self, actor: DbId, id: DbId, input: &UpdateVet) -> CoreResult<Vet> {
        let mut vet = self.store.find_vet(id).await?;
        ensure_owner(actor, vet.user_id, "Vet profile")?;
        input.apply_to(&mut vet);
        vet.updated_at = Utc::now();
        self.store.update_vet(&vet).await
    }

    pub async fn delete(&self, actor: DbId, id: DbId) -> CoreResult<()> {
        let vet = self.store.find_vet(id).await?;
        ensure_owner(actor, vet.user_id, "Vet profile")?;
        self.store.soft_delete_vet(id).await
    }
}
