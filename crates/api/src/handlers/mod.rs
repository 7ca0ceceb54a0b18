//! HTTP handlers, one module per resource.
//!
//! Handlers stay thin: extract, call a service over `state.store`, map the
//! domain record to its response model and wrap it in [`ApiResponse`].
//!
//! [`ApiResponse`]: crate::response::ApiResponse

pub mod auth;
pub mod chat;
pub mod favourite;
pub mod keeper;
pub mod message;
pub mod moderation;
pub mod post;
pub mod review;
pub mod seeker;
pub mod user;
pub mod vet;
