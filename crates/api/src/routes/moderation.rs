//! Route definitions for the `/moderation` resource (moderator only).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::moderation;
use crate::state::AppState;

/// Routes mounted at `/moderation`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(moderation::queue))
        .route("/posts/{id}/approve", post(moderation::approve))
        .route("/posts/{id}/block", post(moderation::block))
}
