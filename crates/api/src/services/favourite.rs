//! Favourite keepers of a user.

use pethaven_core::error::CoreResult;
use pethaven_core::pagination::Page;
use pethaven_core::types::DbId;
use pethaven_db::models::favourite::FavouriteKeeper;
use pethaven_db::models::keeper::Keeper;
use pethaven_db::stores::FavouriteStore;

pub struct FavouriteService<'a, S> {
    store: &'a S,
}

impl<'a, S: FavouriteStore> FavouriteService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Idempotent: adding an existing favourite returns it unchanged.
    pub async fn add(&self, actor: DbId, keeper_id: DbId) -> CoreResult<FavouriteKeeper> {
        self.store.add_favourite(actor, keeper_id).await
    }

    pub async fn remove(&self, actor: DbId, keeper_id: DbId) -> CoreResult<()> {
        self.store.remove_favourite(actor, keeper_id).await
    }

    pub async fn list(&self, actor: DbId, page: Page) -> CoreResult<Vec<Keeper>> {
        self.store.list_favourite_keepers(actor, page).await
    }
}
