//! Route definitions for the `/seekers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::seeker;
use crate::state::AppState;

/// Routes mounted at `/seekers`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(seeker::list_seekers).post(seeker::create_seeker))
        .route(
            "/{id}",
            get(seeker::get_seeker)
                .patch(seeker::update_seeker)
                .delete(seeker::delete_seeker),
        )
}
