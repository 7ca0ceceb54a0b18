//! Profile role names.
//!
//! A user holds a role when a live profile row exists in the matching
//! table (`keepers`, `seekers`, `vets`).

pub const ROLE_KEEPER: &str = "keeper";
pub const ROLE_SEEKER: &str = "seeker";
pub const ROLE_VET: &str = "vet";
