//! Route definitions for the `/posts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::post;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /               -> list_posts
/// POST   /               -> create_post
/// GET    /{id}           -> get_post
/// PATCH  /{id}           -> update_post (author)
/// DELETE /{id}           -> delete_post (author)
/// POST   /{id}/reports   -> create_report
/// GET    /{id}/reports   -> list_reports (moderator)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(post::list_posts).post(post::create_post))
        .route(
            "/{id}",
            get(post::get_post)
                .patch(post::update_post)
                .delete(post::delete_post),
        )
        .route(
            "/{id}/reports",
            get(post::list_reports).post(post::create_report),
        )
}
