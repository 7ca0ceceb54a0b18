//! Favourite keeper model.

use pethaven_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `favourite_keepers` junction table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct FavouriteKeeper {
    pub user_id: DbId,
    pub keeper_id: DbId,
    pub created_at: Timestamp,
}
