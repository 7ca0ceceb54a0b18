//! Route definitions for the `/vets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::vet;
use crate::state::AppState;

/// Routes mounted at `/vets`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vet::list_vets).post(vet::create_vet))
        .route(
            "/{id}",
            get(vet::get_vet)
                .patch(vet::update_vet)
                .delete(vet::delete_vet),
        )
}
