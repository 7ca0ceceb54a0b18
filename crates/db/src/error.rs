//! Translation of `sqlx` failures into the domain error taxonomy.

use pethaven_core::error::CoreError;
use pethaven_core::types::DbId;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Map a `sqlx` error to a [`CoreError`].
///
/// Unique violations on `uq_*` constraints become `Conflict`, foreign key
/// violations become `Validation`, everything else is `Internal` and is
/// logged here so the HTTP layer never has to see driver details.
pub(crate) fn map_db_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return CoreError::Conflict(conflict_message(constraint));
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return CoreError::Validation(format!(
                    "Referenced entity does not exist ({constraint})"
                ));
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(err.to_string())
}

/// Human-readable message for a unique constraint name.
fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_username" => "Username is already taken".to_string(),
        "uq_users_email" => "Email is already registered".to_string(),
        "uq_keepers_user_id" => "User already has a keeper profile".to_string(),
        "uq_seekers_user_id" => "User already has a seeker profile".to_string(),
        "uq_vets_user_id" => "User already has a vet profile".to_string(),
        "uq_reports_post_reporter" => "You have already reported this post".to_string(),
        "uq_keeper_reviews_keeper_author" => {
            "You have already reviewed this keeper".to_string()
        }
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

/// Shorthand for a [`CoreError::NotFound`].
pub(crate) fn not_found(entity: &'static str, id: DbId) -> CoreError {
    CoreError::NotFound { entity, id }
}
