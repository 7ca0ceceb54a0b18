//! Handlers for the `/chats` resource and the messages nested under it.
//!
//! Only chat members may read a chat or post into it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use pethaven_core::types::DbId;
use pethaven_db::models::chat::{ChatResponse, CreateChat};
use pethaven_db::models::message::{MessageResponse, SendMessage};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ValidJson;
use crate::query::{ListParams, PaginationParams};
use crate::response::ApiResponse;
use crate::services::chat::ChatService;
use crate::services::message::MessageService;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chats
// ---------------------------------------------------------------------------

/// POST /api/v1/chats
///
/// The caller is always a member; every listed member must exist.
pub async fn create_chat(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateChat>,
) -> AppResult<impl IntoResponse> {
    let chat = ChatService::new(&state.store)
        .create(auth.user_id, &input)
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(ChatResponse::from(chat))))
}

/// GET /api/v1/chats
pub async fn list_chats(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<ApiResponse<Vec<ChatResponse>>> {
    let chats = ChatService::new(&state.store)
        .list(auth.user_id, params.page())
        .await?;
    Ok(ApiResponse::ok(
        chats.into_iter().map(ChatResponse::from).collect(),
    ))
}

/// GET /api/v1/chats/{id}
pub async fn get_chat(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<ChatResponse>> {
    let chat = ChatService::new(&state.store)
        .get_by_id(auth.user_id, id)
        .await?;
    Ok(ApiResponse::ok(chat.into()))
}

/// POST /api/v1/chats/{id}/leave
pub async fn leave_chat(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ChatService::new(&state.store).leave(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Messages of a chat
// ---------------------------------------------------------------------------

/// POST /api/v1/chats/{id}/messages
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(chat_id): Path<DbId>,
    ValidJson(input): ValidJson<SendMessage>,
) -> AppResult<impl IntoResponse> {
    let message = MessageService::new(&state.store)
        .send(auth.user_id, chat_id, &input)
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(MessageResponse::from(message)),
    ))
}

/// GET /api/v1/chats/{id}/messages
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(chat_id): Path<DbId>,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Vec<MessageResponse>>> {
    let messages = MessageService::new(&state.store)
        .list(
            auth.user_id,
            chat_id,
            params.sort(),
            params.page(),
            &state.config.default_sort,
        )
        .await?;
    Ok(ApiResponse::ok(
        messages.into_iter().map(MessageResponse::from).collect(),
    ))
}
