pub mod auth;
pub mod chat;
pub mod favourite;
pub mod health;
pub mod keeper;
pub mod moderation;
pub mod post;
pub mod seeker;
pub mod user;
pub mod vet;

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
///
/// /users                                 list
/// /users/{id}                            get, update, delete
/// /users/{id}/roles                      keeper / seeker / vet roles
///
/// /keepers                               list, create
/// /keepers/{id}                          get, update, delete
/// /keepers/{id}/reviews                  list, create
/// /reviews/{id}                          get, update, delete
///
/// /seekers                               list, create
/// /seekers/{id}                          get, update, delete
///
/// /vets                                  list, create
/// /vets/{id}                             get, update, delete
///
/// /posts                                 list, create
/// /posts/{id}                            get, update, delete
/// /posts/{id}/reports                    create, list (moderator)
///
/// /moderation/posts                      moderation queue (moderator)
/// /moderation/posts/{id}/approve         approve (moderator)
/// /moderation/posts/{id}/block           block (moderator)
///
/// /favourites                            list
/// /favourites/{keeper_id}                add (PUT), remove (DELETE)
///
/// /chats                                 list, create
/// /chats/{id}                            get (members only)
/// /chats/{id}/leave                      leave (POST)
/// /chats/{id}/messages                   list, send
/// /messages/{id}                         update, delete (sender only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        // Keeper profiles with their reviews.
        .nest("/keepers", keeper::router())
        .route(
            "/reviews/{id}",
            get(handlers::review::get_review)
                .patch(handlers::review::update_review)
                .delete(handlers::review::delete_review),
        )
        .nest("/seekers", seeker::router())
        .nest("/vets", vet::router())
        // Posts, reports and moderation.
        .nest("/posts", post::router())
        .nest("/moderation", moderation::router())
        .nest("/favourites", favourite::router())
        // Chats and their messages.
        .nest("/chats", chat::router())
        .route(
            "/messages/{id}",
            patch(handlers::message::update_message).delete(handlers::message::delete_message),
        )
}
