//! Route definitions for the `/favourites` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::favourite;
use crate::state::AppState;

/// Routes mounted at `/favourites`.
///
/// ```text
/// GET    /               -> list_favourites
/// PUT    /{keeper_id}    -> add_favourite (idempotent)
/// DELETE /{keeper_id}    -> remove_favourite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(favourite::list_favourites))
        .route(
            "/{keeper_id}",
            put(favourite::add_favourite).delete(favourite::remove_favourite),
        )
}
