//! Handlers for the `/moderation` resource. Every endpoint requires a
//! moderator via [`RequireModerator`].

use axum::extract::{Path, Query, State};
use pethaven_core::types::DbId;
use pethaven_db::models::post::PostResponse;

use crate::error::AppResult;
use crate::middleware::rbac::RequireModerator;
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::services::moderation::ModerationService;
use crate::state::AppState;

/// GET /api/v1/moderation/posts
///
/// Reported posts, most reported first.
pub async fn queue(
    RequireModerator(_moderator): RequireModerator,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = ModerationService::new(&state.store)
        .queue(params.page())
        .await?;
    Ok(ApiResponse::ok(
        posts.into_iter().map(PostResponse::from).collect(),
    ))
}

/// POST /api/v1/moderation/posts/{id}/approve
///
/// Drop all reports and republish the post.
pub async fn approve(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = ModerationService::new(&state.store)
        .approve(moderator.user_id, post_id)
        .await?;
    Ok(ApiResponse::ok(post.into()))
}

/// POST /api/v1/moderation/posts/{id}/block
pub async fn block(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = ModerationService::new(&state.store)
        .block(moderator.user_id, post_id)
        .await?;
    Ok(ApiResponse::ok(post.into()))
}
