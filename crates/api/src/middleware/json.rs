//! Validated JSON body extractor.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use pethaven_core::validation::validate_request;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON request body that has passed its model's `validator` rules.
///
/// An empty body deserializes to `T::default()` so converters always get a
/// request value. Malformed JSON is a `400 BAD_REQUEST`; rule violations are
/// a `400 VALIDATION_ERROR`.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let value = if bytes.iter().all(u8::is_ascii_whitespace) {
            T::default()
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
        };

        validate_request(&value)?;
        Ok(ValidJson(value))
    }
}
