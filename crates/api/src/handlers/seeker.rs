//! Handlers for the `/seekers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use pethaven_core::types::DbId;
use pethaven_db::models::seeker::{CreateSeeker, SeekerFilter, SeekerResponse, UpdateSeeker};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ValidJson;
use crate::query::ListParams;
use crate::response::ApiResponse;
use crate::services::seeker::SeekerService;
use crate::state::AppState;

/// POST /api/v1/seekers
pub async fn create_seeker(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateSeeker>,
) -> AppResult<impl IntoResponse> {
    let seeker = SeekerService::new(&state.store)
        .create(auth.user_id, &input)
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(SeekerResponse::from(seeker))))
}

/// GET /api/v1/seekers
///
/// Filters: `city`, `animal_type`.
pub async fn list_seekers(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<SeekerFilter>,
) -> AppResult<ApiResponse<Vec<SeekerResponse>>> {
    let seekers = SeekerService::new(&state.store)
        .list(&filter, params.sort(), params.page(), &state.config.default_sort)
        .await?;
    Ok(ApiResponse::ok(
        seekers.into_iter().map(SeekerResponse::from).collect(),
    ))
}

/// GET /api/v1/seekers/{id}
pub async fn get_seeker(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<SeekerResponse>> {
    let seeker = SeekerService::new(&state.store).get_by_id(id).await?;
    Ok(ApiResponse::ok(seeker.into()))
}

/// PATCH /api/v1/seekers/{id}
pub async fn update_seeker(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateSeeker>,
) -> AppResult<ApiResponse<SeekerResponse>> {
    let seeker = SeekerService::new(&state.store)
        .update(auth.user_id, id, &input)
        .await?;
    Ok(ApiResponse::ok(seeker.into()))
}

/// DELETE /api/v1/seekers/{id}
pub async fn delete_seeker(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    SeekerService::new(&state.store)
        .delete(auth.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
