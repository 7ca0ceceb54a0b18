//! Store for the `messages` table.

use async_trait::async_trait;
use pethaven_core::error::CoreResult;
use pethaven_core::pagination::Page;
use pethaven_core::sorting::SortSpec;
use pethaven_core::types::DbId;

use super::PgStore;
use crate::error::{map_db_error, not_found};
use crate::models::message::Message;

const COLUMNS: &str =
    "id, chat_id, sender_id, content, is_deleted, deleted_at, created_at, updated_at";

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn create_message(&self, message: &Message) -> CoreResult<Message>;
    async fn find_message(&self, id: DbId) -> CoreResult<Message>;
    async fn find_message_include_deleted(&self, id: DbId) -> CoreResult<Message>;
    async fn list_messages(&self, chat_id: DbId, sort: &SortSpec, page: Page)
        -> CoreResult<Vec<Message>>;
    async fn update_message(&self, message: &Message) -> CoreResult<Message>;
    async fn soft_delete_message(&self, id: DbId) -> CoreResult<()>;
}

#[async_trait]
impl MessageStore for PgStore {
    async fn create_message(&self, message: &Message) -> CoreResult<Message> {
        let query = format!(
            "INSERT INTO messages (chat_id, sender_id, content, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Message>(&query)
            .bind(message.chat_id)
            .bind(message.sender_id)
            .bind(&message.content)
            .bind(message.created_at)
            .bind(message.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_db_error)?;
        tracing::debug!(
            message_id = created.id,
            chat_id = created.chat_id,
            sender_id = created.sender_id,
            "Message sent"
        );
        Ok(created)
    }

    async fn find_message(&self, id: DbId) -> CoreResult<Message> {
        let query =
            format!("SELECT {COLUMNS} FROM messages WHERE id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Message", id))
    }

    async fn find_message_include_deleted(&self, id: DbId) -> CoreResult<Message> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Message", id))
    }

    async fn list_messages(
        &self,
        chat_id: DbId,
        sort: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<Message>> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE chat_id = $1 AND is_deleted = false
             {}
             LIMIT $2 OFFSET $3",
            sort.order_by_clause("messages")
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(chat_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn update_message(&self, message: &Message) -> CoreResult<Message> {
        let query = format!(
            "UPDATE messages SET content = $2, updated_at = NOW()
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(message.id)
            .bind(&message.content)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| not_found("Message", message.id))
    }

    async fn soft_delete_message(&self, id: DbId) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE messages SET is_deleted = true, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(not_found("Message", id));
        }
        Ok(())
    }
}
