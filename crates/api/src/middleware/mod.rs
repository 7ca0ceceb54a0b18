//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireModerator`] -- requires the moderator flag.
//! - [`json::ValidJson`] -- JSON body parsed and validated against the
//!   model's `validator` rules.

pub mod auth;
pub mod json;
pub mod rbac;
