//! Moderation queue and decisions. Callers are checked for the moderator
//! flag by the HTTP extractor.

use pethaven_core::error::CoreResult;
use pethaven_core::pagination::Page;
use pethaven_core::types::DbId;
use pethaven_db::models::post::Post;
use pethaven_db::stores::ModerationStore;

pub struct ModerationService<'a, S> {
    store: &'a S,
}

impl<'a, S: ModerationStore> ModerationService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn queue(&self, page: Page) -> CoreResult<Vec<Post>> {
        self.store.moderation_queue(page).await
    }

    pub async fn approve(&self, moderator: DbId, post_id: DbId) -> CoreResult<Post> {
        let post = self.store.approve_post(post_id).await?;
        tracing::info!(post_id, moderator, "Moderation: post approved");
        Ok(post)
    }

    pub async fn block(&self, moderator: DbId, post_id: DbId) -> CoreResult<Post> {
        let post = self.store.block_post(post_id).await?;
        tracing::info!(post_id, moderator, "Moderation: post blocked");
        Ok(post)
    }
}
