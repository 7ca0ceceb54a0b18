//! Chats and membership.

use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::pagination::Page;
use pethaven_core::types::DbId;
use pethaven_db::models::chat::{ChatWithMembers, CreateChat};
use pethaven_db::stores::ChatStore;

use super::stamp;

pub struct ChatService<'a, S> {
    store: &'a S,
}

/// Load a chat and require `actor` to be one of its members.
pub(crate) async fn member_chat<S: ChatStore>(
    store: &S,
    actor: DbId,
    chat_id: DbId,
) -> CoreResult<ChatWithMembers> {
    let chat = store.find_chat(chat_id).await?;
    if !chat.has_member(actor) {
        return Err(CoreError::Forbidden(
            "You are not a member of this chat".to_string(),
        ));
    }
    Ok(chat)
}

impl<'a, S: ChatStore> ChatService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The creator is always a member.
    pub async fn create(&self, actor: DbId, input: &CreateChat) -> CoreResult<ChatWithMembers> {
        let mut chat = input.to_domain(actor);
        stamp(&mut chat.created_at, &mut chat.updated_at);
        self.store
            .create_chat(&chat, &input.member_ids_with(actor))
            .await
    }

    pub async fn list(&self, actor: DbId, page: Page) -> CoreResult<Vec<ChatWithMembers>> {
        self.store.list_chats_for_user(actor, page).await
    }

    pub async fn get_by_id(&self, actor: DbId, id: DbId) -> CoreResult<ChatWithMembers> {
        member_chat(self.store, actor, id).await
    }

    pub async fn leave(&self, actor: DbId, id: DbId) -> CoreResult<()> {
        member_chat(self.store, actor, id).await?;
        self.store.remove_chat_member(id, actor).await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::services::fake::FakeStore;

    #[tokio::test]
    async fn creator_is_member_and_outsider_is_forbidden() {
        let store = FakeStore::with_users(&[1, 2, 3]);
        let service = ChatService::new(&store);

        let chat = service
            .create(
                1,
                &CreateChat {
                    title: None,
                    member_ids: vec![2, 2],
                },
            )
            .await
            .unwrap();
        assert_eq!(chat.member_ids, vec![1, 2]);

        assert!(service.get_by_id(2, chat.chat.id).await.is_ok());
        assert_matches!(
            service.get_by_id(3, chat.chat.id).await,
            Err(CoreError::Forbidden(_))
        );
    }

    #[tokio::test]
    async fn leaving_removes_membership() {
        let store = FakeStore::with_users(&[1, 2]);
        let service = ChatService::new(&store);
        let chat = service
            .create(
                1,
                &CreateChat {
                    title: Some("Vet advice".to_string()),
                    member_ids: vec![2],
                },
            )
            .await
            .unwrap();

        service.leave(2, chat.chat.id).await.unwrap();
        assert!(service.list(2, Page::default()).await.unwrap().is_empty());
        assert_matches!(
            service.leave(2, chat.chat.id).await,
            Err(CoreError::Forbidden(_))
        );
    }

    #[tokio::test]
    async fn chat_closes_when_last_member_leaves() {
        let store = FakeStore::with_users(&[1, 2]);
        let service = ChatService::new(&store);
        let chat = service
            .create(
                1,
                &CreateChat {
                    title: None,
                    member_ids: vec![2],
                },
            )
            .await
            .unwrap();

        service.leave(1, chat.chat.id).await.unwrap();
        assert!(!store.find_chat(chat.chat.id).await.unwrap().chat.is_deleted);

        service.leave(2, chat.chat.id).await.unwrap();
        assert_matches!(
            store.find_chat(chat.chat.id).await,
            Err(CoreError::NotFound { entity: "Chat", .. })
        );
        let closed = store.find_chat_include_deleted(chat.chat.id).await.unwrap();
        assert!(closed.chat.is_deleted);
        assert!(closed.chat.deleted_at.is_some());
        assert!(closed.member_ids.is_empty());
    }
}
