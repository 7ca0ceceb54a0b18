use crate::types::DbId;

/// Domain error taxonomy shared by stores, services and handlers.
///
/// Stores produce `NotFound`, `Conflict` and `Internal`; services add
/// `Validation`, `Unauthorized` and `Forbidden`. Every other layer passes
/// errors through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias for results carrying a [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
