//! Aggregated profile roles of a user.

use pethaven_core::types::DbId;
use serde::Serialize;

/// One role a user holds, with the id of the profile that grants it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRole {
    /// `keeper`, `seeker` or `vet`.
    pub role: &'static str,
    pub profile_id: DbId,
}
