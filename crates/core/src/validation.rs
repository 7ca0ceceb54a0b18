//! Request model validation.

use validator::Validate;

use crate::error::{CoreError, CoreResult};

/// Run the `validator` rules declared on a request model.
///
/// All field failures are folded into a single [`CoreError::Validation`].
pub fn validate_request<T: Validate>(request: &T) -> CoreResult<()> {
    request
        .validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}
