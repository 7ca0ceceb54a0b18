//! Keeper review business rules.

use crate::error::{CoreError, CoreResult};

/// Lowest accepted review grade.
pub const MIN_GRADE: i16 = 1;

/// Highest accepted review grade.
pub const MAX_GRADE: i16 = 5;

/// Reject grades outside `[MIN_GRADE, MAX_GRADE]`.
pub fn validate_grade(grade: i16) -> CoreResult<()> {
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(CoreError::Validation(format!(
            "Grade must be between {MIN_GRADE} and {MAX_GRADE}, got {grade}"
        )));
    }
    Ok(())
}
