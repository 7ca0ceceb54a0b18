//! Handlers for the `/posts` resource and the reports nested under it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use pethaven_core::types::DbId;
use pethaven_db::models::post::{CreatePost, PostFilter, PostResponse, UpdatePost};
use pethaven_db::models::report::{CreateReport, Report};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ValidJson;
use crate::middleware::rbac::RequireModerator;
use crate::query::ListParams;
use crate::response::ApiResponse;
use crate::services::post::PostService;
use crate::services::report::ReportService;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// POST /api/v1/posts
///
/// `status` defaults to `published`; authors may not set `blocked`.
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreatePost>,
) -> AppResult<impl IntoResponse> {
    let post = PostService::new(&state.store)
        .create(auth.user_id, &input)
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(PostResponse::from(post))))
}

/// GET /api/v1/posts
///
/// Filters: `author_id`, `status`, `city`, `animal_type`. Non-moderators see
/// published posts and their own.
pub async fn list_posts(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<PostFilter>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = PostService::new(&state.store)
        .list(
            &auth.viewer(),
            &filter,
            params.sort(),
            params.page(),
            &state.config.default_sort,
        )
        .await?;
    Ok(ApiResponse::ok(
        posts.into_iter().map(PostResponse::from).collect(),
    ))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = PostService::new(&state.store).get_by_id(&auth.viewer(), id).await?;
    Ok(ApiResponse::ok(post.into()))
}

/// PATCH /api/v1/posts/{id}
pub async fn update_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdatePost>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = PostService::new(&state.store)
        .update(auth.user_id, id, &input)
        .await?;
    Ok(ApiResponse::ok(post.into()))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    PostService::new(&state.store)
        .delete(auth.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// POST /api/v1/posts/{id}/reports
///
/// Only published posts can be reported. The response carries the new
/// report count and the post status, which flips to `blocked` once the
/// configured threshold is reached.
pub async fn create_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    ValidJson(input): ValidJson<CreateReport>,
) -> AppResult<impl IntoResponse> {
    let receipt = ReportService::new(&state.store)
        .create(
            auth.user_id,
            post_id,
            &input,
            state.config.moderation_report_threshold,
        )
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(receipt)))
}

/// GET /api/v1/posts/{id}/reports (moderator only)
pub async fn list_reports(
    RequireModerator(_moderator): RequireModerator,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<ApiResponse<Vec<Report>>> {
    let reports = ReportService::new(&state.store)
        .list_for_post(post_id)
        .await?;
    Ok(ApiResponse::ok(reports))
}
