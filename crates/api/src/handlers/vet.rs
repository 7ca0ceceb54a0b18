//! Handlers for the `/vets` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use pethaven_core::types::DbId;
use pethaven_db::models::vet::{CreateVet, UpdateVet, VetFilter, VetResponse};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ValidJson;
use crate::query::ListParams;
use crate::response::ApiResponse;
use crate::services::vet::VetService;
use crate::state::AppState;

/// POST /api/v1/vets
pub async fn create_vet(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateVet>,
) -> AppResult<impl IntoResponse> {
    let vet = VetService::new(&state.store)
        .create(auth.user_id, &input)
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(VetResponse::from(vet))))
}

/// GET /api/v1/vets
///
/// Filters: `city`, `specialization`.
pub async fn list_vets(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<VetFilter>,
) -> AppResult<ApiResponse<Vec<VetResponse>>> {
    let vets = VetService::new(&state.store)
        .list(&filter, params.sort(), params.page(), &state.config.default_sort)
        .await?;
    Ok(ApiResponse::ok(
        vets.into_iter().map(VetResponse::from).collect(),
    ))
}

/// GET /api/v1/vets/{id}
pub async fn get_vet(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<VetResponse>> {
    let vet = VetService::new(&state.store).get_by_id(id).await?;
    Ok(ApiResponse::ok(vet.into()))
}

/// PATCH /api/v1/vets/{id}
pub async fn update_vet(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateVet>,
) -> AppResult<ApiResponse<VetResponse>> {
    let vet = VetService::new(&state.store)
        .update(auth.user_id, id, &input)
        .await?;
    Ok(ApiResponse::ok(vet.into()))
}

/// DELETE /api/v1/vets/{id}
pub async fn delete_vet(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    VetService::new(&state.store)
        .delete(auth.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
