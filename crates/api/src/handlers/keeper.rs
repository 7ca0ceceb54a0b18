//! Handlers for the `/keepers` resource and the reviews nested under it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use pethaven_core::types::DbId;
use pethaven_db::models::keeper::{CreateKeeper, KeeperFilter, KeeperResponse, UpdateKeeper};
use pethaven_db::models::review::{CreateReview, ReviewResponse};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ValidJson;
use crate::query::ListParams;
use crate::response::ApiResponse;
use crate::services::keeper::KeeperService;
use crate::services::review::ReviewService;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Keeper profiles
// ---------------------------------------------------------------------------

/// POST /api/v1/keepers
///
/// Create the caller's keeper profile. 409 if one already exists.
pub async fn create_keeper(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateKeeper>,
) -> AppResult<impl IntoResponse> {
    let keeper = KeeperService::new(&state.store)
        .create(auth.user_id, &input)
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(KeeperResponse::from(keeper))))
}

/// GET /api/v1/keepers
///
/// Filters: `city`, `has_cage`, `min_rating`.
pub async fn list_keepers(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<KeeperFilter>,
) -> AppResult<ApiResponse<Vec<KeeperResponse>>> {
    let keepers = KeeperService::new(&state.store)
        .list(&filter, params.sort(), params.page(), &state.config.default_sort)
        .await?;
    Ok(ApiResponse::ok(
        keepers.into_iter().map(KeeperResponse::from).collect(),
    ))
}

/// GET /api/v1/keepers/{id}
pub async fn get_keeper(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<KeeperResponse>> {
    let keeper = KeeperService::new(&state.store).get_by_id(id).await?;
    Ok(ApiResponse::ok(keeper.into()))
}

/// PATCH /api/v1/keepers/{id}
pub async fn update_keeper(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateKeeper>,
) -> AppResult<ApiResponse<KeeperResponse>> {
    let keeper = KeeperService::new(&state.store)
        .update(auth.user_id, id, &input)
        .await?;
    Ok(ApiResponse::ok(keeper.into()))
}

/// DELETE /api/v1/keepers/{id}
pub async fn delete_keeper(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    KeeperService::new(&state.store)
        .delete(auth.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Reviews of a keeper
// ---------------------------------------------------------------------------

/// POST /api/v1/keepers/{id}/reviews
///
/// Grade must be 1..=5; keepers cannot review themselves.
pub async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(keeper_id): Path<DbId>,
    ValidJson(input): ValidJson<CreateReview>,
) -> AppResult<impl IntoResponse> {
    let review = ReviewService::new(&state.store)
        .create(auth.user_id, keeper_id, &input)
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(ReviewResponse::from(review))))
}

/// GET /api/v1/keepers/{id}/reviews
pub async fn list_reviews(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(keeper_id): Path<DbId>,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Vec<ReviewResponse>>> {
    let reviews = ReviewService::new(&state.store)
        .list_for_keeper(
            keeper_id,
            params.sort(),
            params.page(),
            &state.config.default_sort,
        )
        .await?;
    Ok(ApiResponse::ok(
        reviews.into_iter().map(ReviewResponse::from).collect(),
    ))
}
