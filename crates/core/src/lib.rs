//! Domain primitives shared by the PetHaven store and HTTP layers.
//!
//! Nothing in this crate performs I/O: it holds the error taxonomy, the
//! id/timestamp aliases and the small business rules (sorting, paging,
//! review grades, post status, moderation threshold) that services apply.

pub mod error;
pub mod moderation;
pub mod pagination;
pub mod post_status;
pub mod review;
pub mod roles;
pub mod sorting;
pub mod types;
pub mod validation;
