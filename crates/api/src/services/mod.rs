//! Business rules between handlers and stores.
//!
//! A service borrows a store adapter for the duration of one request and is
//! generic over the store traits it needs, so unit tests drive it with
//! in-memory fakes. Services stamp timestamps the converters left unset,
//! resolve sort expressions against the per-call [`SortDefaults`], and
//! check ownership. Store errors pass through unchanged.
//!
//! [`SortDefaults`]: pethaven_core::sorting::SortDefaults

pub mod chat;
pub mod favourite;
pub mod keeper;
pub mod message;
pub mod moderation;
pub mod post;
pub mod report;
pub mod review;
pub mod role;
pub mod seeker;
pub mod session;
pub mod user;
pub mod vet;

#[cfg(test)]
mod fake;

use chrono::Utc;
use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::types::{fill_if_unset, DbId, Timestamp};

/// Fill `created_at` / `updated_at` that are still at their default.
fn stamp(created_at: &mut Timestamp, updated_at: &mut Timestamp) {
    let now = Utc::now();
    fill_if_unset(created_at, now);
    fill_if_unset(updated_at, now);
}

/// `Forbidden` unless `actor` owns the record.
fn ensure_owner(actor: DbId, owner: DbId, entity: &str) -> CoreResult<()> {
    if actor != owner {
        return Err(CoreError::Forbidden(format!(
            "{entity} belongs to another user"
        )));
    }
    Ok(())
}
