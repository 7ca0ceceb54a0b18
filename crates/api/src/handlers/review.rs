//! Handlers for the `/reviews/{id}` resource. Creation and listing live
//! under `/keepers/{id}/reviews`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use pethaven_core::types::DbId;
use pethaven_db::models::review::{ReviewResponse, UpdateReview};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ValidJson;
use crate::response::ApiResponse;
use crate::services::review::ReviewService;
use crate::state::AppState;

/// GET /api/v1/reviews/{id}
pub async fn get_review(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<ReviewResponse>> {
    let review = ReviewService::new(&state.store).get_by_id(id).await?;
    Ok(ApiResponse::ok(review.into()))
}

/// PATCH /api/v1/reviews/{id}
///
/// The keeper's rating is recomputed in the same transaction.
pub async fn update_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateReview>,
) -> AppResult<ApiResponse<ReviewResponse>> {
    let review = ReviewService::new(&state.store)
        .update(auth.user_id, id, &input)
        .await?;
    Ok(ApiResponse::ok(review.into()))
}

/// DELETE /api/v1/reviews/{id}
pub async fn delete_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ReviewService::new(&state.store)
        .delete(auth.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
