//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use pethaven_core::types::DbId;
use pethaven_db::models::role::UserRole;
use pethaven_db::models::user::{UpdateUser, UserFilter, UserResponse};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ValidJson;
use crate::query::ListParams;
use crate::response::ApiResponse;
use crate::services::role::RoleService;
use crate::services::user::UserService;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<UserFilter>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = UserService::new(&state.store)
        .list(&filter, params.sort(), params.page(), &state.config.default_sort)
        .await?;
    Ok(ApiResponse::ok(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = UserService::new(&state.store).get_by_id(id).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// PATCH /api/v1/users/{id}
///
/// Only the account owner may edit it.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateUser>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = UserService::new(&state.store)
        .update(auth.user_id, id, &input)
        .await?;
    Ok(ApiResponse::ok(user.into()))
}

/// DELETE /api/v1/users/{id}
///
/// Soft-delete the caller's own account. Returns 204 No Content.
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    UserService::new(&state.store).delete(auth.user_id, id).await?;
    tracing::info!(user_id = id, "User account deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{id}/roles
pub async fn list_user_roles(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Vec<UserRole>>> {
    let roles = RoleService::new(&state.store).roles_of(id).await?;
    Ok(ApiResponse::ok(roles))
}
