//! Chat messages. Every operation requires chat membership.

use chrono::Utc;
use pethaven_core::error::CoreResult;
use pethaven_core::pagination::Page;
use pethaven_core::sorting::{resolve_sort, SortDefaults};
use pethaven_core::types::DbId;
use pethaven_db::models::message::{Message, SendMessage, UpdateMessage, MESSAGE_SORT_FIELDS};
use pethaven_db::stores::{ChatStore, MessageStore};

use super::chat::member_chat;
use super::{ensure_owner, stamp};

pub struct MessageService<'a, S> {
    store: &'a S,
}

impl<'a, S: ChatStore + MessageStore> MessageService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn send(&self, actor: DbId, chat_id: DbId, input: &SendMessage) -> CoreResult<Message> {
        member_chat(self.store, actor, chat_id).await?;
        let mut message = input.to_domain(chat_id, actor);
        stamp(&mut message.created_at, &mut message.updated_at);
        self.store.create_message(&message).await
    }

    pub async fn list(
        &self,
        actor: DbId,
        chat_id: DbId,
        sort: Option<&str>,
        page: Page,
        defaults: &SortDefaults,
    ) -> CoreResult<Vec<Message>> {
        let sort = resolve_sort(sort, MESSAGE_SORT_FIELDS, defaults)?;
        member_chat(self.store, actor, chat_id).await?;
        self.store.list_messages(chat_id, &sort, page).await
    }

    /// Only the sender may edit, and only while still a member.
    pub async fn update(&self, actor: DbId, id: DbId, input: &UpdateMessage) -> CoreResult<Message> {
        let mut message = self.store.find_message(id).await?;
        ensure_owner(actor, message.sender_id, "Message")?;
        member_chat(self.store, actor, message.chat_id).await?;
        input.apply_to(&mut message);
        message.updated_at = Utc::now();
        self.store.update_message(&message).await
    }

    pub async fn delete(&self, actor: DbId, id: DbId) -> CoreResult<()> {
        let message = self.store.find_message(id).await?;
        ensure_owner(actor, message.sender_id, "Message")?;
        self.store.soft_delete_message(id).await
    }
}
