//! Seeker profiles.

use chrono::Utc;
use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::pagination::Page;
use pethaven_core::sorting::{resolve_sort, SortDefaults};
use pethaven_core::types::DbId;
use pethaven_db::models::seeker::{
    CreateSeeker, Seeker, SeekerFilter, UpdateSeeker, SEEKER_SORT_FIELDS,
};
use pethaven_db::stores::SeekerStore;

use super::{ensure_owner, stamp};

pub struct SeekerService<'a, S> {
    store: &'a S,
}

impl<'a, S: SeekerStore> SeekerService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn create(&self, actor: DbId, input: &CreateSeeker) -> CoreResult<Seeker> {
        if self.store.find_seeker_by_user(actor).await?.is_some() {
            return Err(CoreError::Conflict(
                "User already has a seeker profile".to_string(),
            ));
        }
        let mut seeker = input.to_domain(actor);
        stamp(&mut seeker.created_at, &mut seeker.updated_at);
        self.store.create_seeker(&seeker).await
    }

    pub async fn get_by_id(&self, id: DbId) -> CoreResult<Seeker> {
        self.store.find_seeker(id).await
    }

    pub async fn list(
        &self,
        filter: &SeekerFilter,
        sort: Option<&str>,
        page: Page,
        defaults: &SortDefaults,
    ) -> CoreResult<Vec<Seeker>> {
        let sort = resolve_sort(sort, SEEKER_SORT_FIELDS, defaults)?;
        self.store.list_seekers(filter, &sort, page).await
    }

    pub async fn update(&self, actor: DbId, id: DbId, input: &UpdateSeeker) -> CoreResult<Seeker> {
        let mut seeker = self.store.find_seeker(id).await?;
        ensure_owner(actor, seeker.user_id, "Seeker profile")?;
        input.apply_to(&mut seeker);
        seeker.updated_at = Utc::now();
        self.store.update_seeker(&seeker).await
    }

    pub async fn delete(&self, actor: DbId, id: DbId) -> CoreResult<()> {
        let seeker = self.store.find_seeker(id).await?;
        ensure_owner(actor, seeker.user_id, "Seeker profile")?;
        self.store.soft_delete_seeker(id).await
    }
}
