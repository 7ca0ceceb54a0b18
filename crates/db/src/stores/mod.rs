//! Store traits and the PostgreSQL adapter.
//!
//! Each entity exposes its persistence contract as an object-safe
//! `async_trait`. [`PgStore`] implements every trait against one shared
//! [`DbPool`]. Method names carry the entity name so a service bounded by
//! several traits never sees an ambiguous call.
//!
//! Conventions shared by all implementations:
//!
//! - reads exclude soft-deleted rows unless the method says `include_deleted`;
//! - a missing row is `CoreError::NotFound`, never `Ok(None)`, for lookups by
//!   primary key;
//! - every mutating statement sets `updated_at = NOW()`;
//! - multi-statement operations run inside one transaction.

mod chat;
mod favourite;
mod keeper;
mod message;
mod moderation;
mod post;
mod report;
mod review;
mod seeker;
mod session;
mod user;
mod vet;

pub use chat::ChatStore;
pub use favourite::FavouriteStore;
pub use keeper::KeeperStore;
pub use message::MessageStore;
pub use moderation::ModerationStore;
pub use post::PostStore;
pub use report::ReportStore;
pub use review::ReviewStore;
pub use seeker::SeekerStore;
pub use session::SessionStore;
pub use user::UserStore;
pub use vet::VetStore;

use crate::DbPool;

/// PostgreSQL adapter for every store trait. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
