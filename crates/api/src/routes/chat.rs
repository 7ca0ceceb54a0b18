//! Route definitions for the `/chats` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chats`.
///
/// ```text
/// GET  /                 -> list_chats
/// POST /                 -> create_chat
/// GET  /{id}             -> get_chat (members)
/// POST /{id}/leave       -> leave_chat
/// GET  /{id}/messages    -> list_messages (members)
/// POST /{id}/messages    -> send_message (members)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(chat::list_chats).post(chat::create_chat))
        .route("/{id}", get(chat::get_chat))
        .route("/{id}/leave", post(chat::leave_chat))
        .route(
            "/{id}/messages",
            get(chat::list_messages).post(chat::send_message),
        )
}
