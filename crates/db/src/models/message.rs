//! Chat message model and DTOs.

use pethaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::patch;

/// A row from the `messages` table.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct Message {
    pub id: DbId,
    pub chat_id: DbId,
    pub sender_id: DbId,
    pub content: String,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: DbId,
    pub chat_id: DbId,
    pub sender_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            chat_id: m.chat_id,
            sender_id: m.sender_id,
            content: m.content,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SendMessage {
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

impl SendMessage {
    pub fn to_domain(&self, chat_id: DbId, sender_id: DbId) -> Message {
        Message {
            chat_id,
            sender_id,
            content: self.content.clone(),
            ..Message::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMessage {
    #[validate(length(min = 1, max = 4000))]
    pub content: Option<String>,
}

impl UpdateMessage {
    pub fn apply_to(&self, message: &mut Message) {
        patch(&mut message.content, &self.content);
    }
}

pub const MESSAGE_SORT_FIELDS: &[&str] = &["created_at"];
