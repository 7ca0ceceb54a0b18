//! Handlers for the `/favourites` resource: the caller's favourite keepers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use pethaven_core::types::DbId;
use pethaven_db::models::favourite::FavouriteKeeper;
use pethaven_db::models::keeper::KeeperResponse;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::services::favourite::FavouriteService;
use crate::state::AppState;

/// GET /api/v1/favourites
pub async fn list_favourites(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<ApiResponse<Vec<KeeperResponse>>> {
    let keepers = FavouriteService::new(&state.store)
        .list(auth.user_id, params.page())
        .await?;
    Ok(ApiResponse::ok(
        keepers.into_iter().map(KeeperResponse::from).collect(),
    ))
}

/// PUT /api/v1/favourites/{keeper_id}
///
/// Idempotent: adding a keeper twice returns the original row.
pub async fn add_favourite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(keeper_id): Path<DbId>,
) -> AppResult<ApiResponse<FavouriteKeeper>> {
    let favourite = FavouriteService::new(&state.store)
        .add(auth.user_id, keeper_id)
        .await?;
    Ok(ApiResponse::ok(favourite))
}

/// DELETE /api/v1/favourites/{keeper_id}
pub async fn remove_favourite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(keeper_id): Path<DbId>,
) -> AppResult<StatusCode> {
    FavouriteService::new(&state.store)
        .remove(auth.user_id, keeper_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
