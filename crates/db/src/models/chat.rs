//! Chat and chat membership models.

use pethaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `chats` table.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct Chat {
    pub id: DbId,
    pub title: Option<String>,
    pub created_by: DbId,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A chat together with the ids of its current members.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatWithMembers {
    pub chat: Chat,
    pub member_ids: Vec<DbId>,
}

impl ChatWithMembers {
    pub fn has_member(&self, user_id: DbId) -> bool {
        self.member_ids.contains(&user_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub id: DbId,
    pub title: Option<String>,
    pub created_by: DbId,
    pub member_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ChatWithMembers> for ChatResponse {
    fn from(c: ChatWithMembers) -> Self {
        Self {
            id: c.chat.id,
            title: c.chat.title,
            created_by: c.chat.created_by,
            member_ids: c.member_ids,
            created_at: c.chat.created_at,
            updated_at: c.chat.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateChat {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    /// Other participants. The creator is always added.
    #[validate(length(min = 1, max = 50))]
    pub member_ids: Vec<DbId>,
}

impl CreateChat {
    pub fn to_domain(&self, creator_id: DbId) -> Chat {
        Chat {
            title: self.title.clone(),
            created_by: creator_id,
            ..Chat::default()
        }
    }

    /// Creator first, then the requested members with duplicates removed.
    pub fn member_ids_with(&self, creator_id: DbId) -> Vec<DbId> {
        let mut ids = vec![creator_id];
        for id in &self.member_ids {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_ids_put_creator_first_and_dedupe() {
        let input = CreateChat {
            title: None,
            member_ids: vec![5, 1, 5, 9],
        };
        assert_eq!(input.member_ids_with(1), vec![1, 5, 9]);
    }

    #[test]
    fn to_domain_sets_creator() {
        let chat = CreateChat {
            title: Some("Barsik handover".into()),
            member_ids: vec![2],
        }
        .to_domain(1);
        assert_eq!(chat.created_by, 1);
        assert_eq!(chat.title.as_deref(), Some("Barsik handover"));
    }

    #[test]
    fn chat_requires_a_member() {
        assert!(CreateChat::default().validate().is_err());
    }
}
