//! Handlers for the `/messages/{id}` resource. Sending and listing live
//! under `/chats/{id}/messages`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use pethaven_core::types::DbId;
use pethaven_db::models::message::{MessageResponse, UpdateMessage};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ValidJson;
use crate::response::ApiResponse;
use crate::services::message::MessageService;
use crate::state::AppState;

/// PATCH /api/v1/messages/{id}
///
/// Only the sender may edit, and only while still a chat member.
pub async fn update_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateMessage>,
) -> AppResult<ApiResponse<MessageResponse>> {
    let message = MessageService::new(&state.store)
        .update(auth.user_id, id, &input)
        .await?;
    Ok(ApiResponse::ok(message.into()))
}

/// DELETE /api/v1/messages/{id}
pub async fn delete_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    MessageService::new(&state.store)
        .delete(auth.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
