//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /             -> list_users
/// GET    /{id}         -> get_user
/// PATCH  /{id}         -> update_user (owner)
/// DELETE /{id}         -> delete_user (owner)
/// GET    /{id}/roles   -> list_user_roles
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users))
        .route(
            "/{id}",
            get(user::get_user)
                .patch(user::update_user)
                .delete(user::delete_user),
        )
        .route("/{id}/roles", get(user::list_user_roles))
}
