//! Keeper profiles.

use chrono::Utc;
use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::pagination::Page;
use pethaven_core::sorting::{resolve_sort, SortDefaults};
use pethaven_core::types::DbId;
use pethaven_db::models::keeper::{
    CreateKeeper, Keeper, KeeperFilter, UpdateKeeper, KEEPER_SORT_FIELDS,
};
use pethaven_db::stores::KeeperStore;

use super::{ensure_owner, stamp};

pub struct KeeperService<'a, S> {
    store: &'a S,
}

impl<'a, S: KeeperStore> KeeperService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create the caller's keeper profile. A user holds at most one.
    pub async fn create(&self, actor: DbId, input: &CreateKeeper) -> CoreResult<Keeper> {
        if self.store.find_keeper_by_user(actor).await?.is_some() {
            return Err(CoreError::Conflict(
                "User already has a keeper profile".to_string(),
            ));
        }
        let mut keeper = input.to_domain(actor);
        stamp(&mut keeper.created_at, &mut keeper.updated_at);
        self.store.create_keeper(&keeper).await
    }

    pub async fn get_by_id(&self, id: DbId) -> CoreResult<Keeper> {
        self.store.find_keeper(id).await
    }

    pub async fn list(
        &self,
        filter: &KeeperFilter,
        sort: Option<&str>,
        page: Page,
        defaults: &SortDefaults,
    ) -> CoreResult<Vec<Keeper>> {
        let sort = resolve_sort(sort, KEEPER_SORT_FIELDS, defaults)?;
        self.store.list_keepers(filter, &sort, page).await
    }

    pub async fn update(&self, actor: DbId, id: DbId, input: &UpdateKeeper) -> CoreResult<Keeper> {
        let mut keeper = self.store.find_keeper(id).await?;
        ensure_owner(actor, keeper.user_id, "Keeper profile")?;
        input.apply_to(&mut keeper);
        keeper.updated_at = Utc::now();
        self.store.update_keeper(&keeper).await
    }

    pub async fn delete(&self, actor: DbId, id: DbId) -> CoreResult<()> {
        let keeper = self.store.find_keeper(id).await?;
        ensure_owner(actor, keeper.user_id, "Keeper profile")?;
        self.store.soft_delete_keeper(id).await?;
        tracing::info!(keeper_id = id, user_id = actor, "Keeper profile deleted");
        Ok(())
    }
}
