//! Route definitions for the `/keepers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::keeper;
use crate::state::AppState;

/// Routes mounted at `/keepers`.
///
/// ```text
/// GET    /               -> list_keepers
/// POST   /               -> create_keeper
/// GET    /{id}           -> get_keeper
/// PATCH  /{id}           -> update_keeper (owner)
/// DELETE /{id}           -> delete_keeper (owner)
/// GET    /{id}/reviews   -> list_reviews
/// POST   /{id}/reviews   -> create_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(keeper::list_keepers).post(keeper::create_keeper))
        .route(
            "/{id}",
            get(keeper::get_keeper)
                .patch(keeper::update_keeper)
                .delete(keeper::delete_keeper),
        )
        .route(
            "/{id}/reviews",
            get(keeper::list_reviews).post(keeper::create_review),
        )
}
