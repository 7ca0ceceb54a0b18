//! Store for the `chats` and `chat_members` tables.

use async_trait::async_trait;
use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::pagination::Page;
use pethaven_core::types::DbId;

use super::PgStore;
use crate::error::{map_db_error, not_found};
use crate::models::chat::{Chat, ChatWithMembers};

const COLUMNS: &str = "id, title, created_by, is_deleted, deleted_at, created_at, updated_at";

#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Insert a chat and its memberships in one transaction. Every member
    /// must be a live user, otherwise nothing is written.
    async fn create_chat(&self, chat: &Chat, member_ids: &[DbId]) -> CoreResult<ChatWithMembers>;

    async fn find_chat(&self, id: DbId) -> CoreResult<ChatWithMembers>;

    async fn find_chat_include_deleted(&self, id: DbId) -> CoreResult<ChatWithMembers>;

    /// Live chats `user_id` belongs to, most recently active first.
    async fn list_chats_for_user(&self, user_id: DbId, page: Page)
        -> CoreResult<Vec<ChatWithMembers>>;

    async fn is_chat_member(&self, chat_id: DbId, user_id: DbId) -> CoreResult<bool>;

    /// Hard-delete one membership. The chat is soft-deleted when its last
    /// member leaves.
    async fn remove_chat_member(&self, chat_id: DbId, user_id: DbId) -> CoreResult<()>;
}

impl PgStore {
    async fn chat_member_ids(&self, chat_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM chat_members WHERE chat_id = $1 ORDER BY joined_at, user_id",
        )
        .bind(chat_id)
        .fetch_all(self.pool())
        .await
    }
}

#[async_trait]
impl ChatStore for PgStore {
    async fn create_chat(&self, chat: &Chat, member_ids: &[DbId]) -> CoreResult<ChatWithMembers> {
        let mut tx = self.pool().begin().await.map_err(map_db_error)?;

        let live: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE id = ANY($1) AND is_deleted = false",
        )
        .bind(member_ids)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;
        if live != member_ids.len() as i64 {
            return Err(CoreError::Validation(
                "One or more chat members do not exist".to_string(),
            ));
        }

        let query = format!(
            "INSERT INTO chats (title, created_by, created_at, updated_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Chat>(&query)
            .bind(&chat.title)
            .bind(chat.created_by)
            .bind(chat.created_at)
            .bind(chat.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        for &user_id in member_ids {
            sqlx::query("INSERT INTO chat_members (chat_id, user_id) VALUES ($1, $2)")
                .bind(created.id)
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        tracing::info!(
            chat_id = created.id,
            created_by = created.created_by,
            members = member_ids.len(),
            "Chat created"
        );
        Ok(ChatWithMembers {
            chat: created,
            member_ids: member_ids.to_vec(),
        })
    }

    async fn find_chat(&self, id: DbId) -> CoreResult<ChatWithMembers> {
        let query = format!("SELECT {COLUMNS} FROM chats WHERE id = $1 AND is_deleted = false");
        let chat = sqlx::query_as::<_, Chat>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Chat", id))?;
        let member_ids = self.chat_member_ids(id).await.map_err(map_db_error)?;
        Ok(ChatWithMembers { chat, member_ids })
    }

    async fn find_chat_include_deleted(&self, id: DbId) -> CoreResult<ChatWithMembers> {
        let query = format!("SELECT {COLUMNS} FROM chats WHERE id = $1");
        let chat = sqlx::query_as::<_, Chat>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Chat", id))?;
        let member_ids = self.chat_member_ids(id).await.map_err(map_db_error)?;
        Ok(ChatWithMembers { chat, member_ids })
    }

    async fn list_chats_for_user(
        &self,
        user_id: DbId,
        page: Page,
    ) -> CoreResult<Vec<ChatWithMembers>> {
        let query = format!(
            "SELECT {COLUMNS} FROM chats
             WHERE is_deleted = false
               AND id IN (SELECT chat_id FROM chat_members WHERE user_id = $1)
             ORDER BY updated_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let chats = sqlx::query_as::<_, Chat>(&query)
            .bind(user_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)?;

        let mut result = Vec::with_capacity(chats.len());
        for chat in chats {
            let member_ids = self.chat_member_ids(chat.id).await.map_err(map_db_error)?;
            result.push(ChatWithMembers { chat, member_ids });
        }
        Ok(result)
    }

    async fn is_chat_member(&self, chat_id: DbId, user_id: DbId) -> CoreResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM chat_members WHERE chat_id = $1 AND user_id = $2)",
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_db_error)
    }

    async fn remove_chat_member(&self, chat_id: DbId, user_id: DbId) -> CoreResult<()> {
        let mut tx = self.pool().begin().await.map_err(map_db_error)?;

        // Serialises concurrent leaves so exactly one sees the chat empty.
        let locked: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM chats WHERE id = $1 AND is_deleted = false FOR UPDATE",
        )
        .bind(chat_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;
        if locked.is_none() {
            return Err(not_found("Chat", chat_id));
        }

        let result = sqlx::query("DELETE FROM chat_members WHERE chat_id = $1 AND user_id = $2")
            .bind(chat_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(not_found("Chat", chat_id));
        }

        let remaining: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM chat_members WHERE chat_id = $1")
                .bind(chat_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;

        let closed = remaining == 0;
        sqlx::query(
            "UPDATE chats SET
                is_deleted = $2,
                deleted_at = CASE WHEN $2 THEN NOW() ELSE deleted_at END,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(chat_id)
        .bind(closed)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        tracing::info!(chat_id, user_id, remaining, "Chat member left");
        if closed {
            tracing::info!(chat_id, "Chat closed after last member left");
        }
        Ok(())
    }
}
