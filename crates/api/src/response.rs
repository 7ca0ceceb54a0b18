//! Response envelope shared by every endpoint.
//!
//! Success: `{ "status": "success", "data": <payload> }`.
//! Failure: `{ "status": "error", "data": { "code": ..., "message": ... } }`.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

const STATUS_SUCCESS: &str = "success";
const STATUS_ERROR: &str = "error";

/// Success envelope.
///
/// ```ignore
/// Ok(ApiResponse::ok(items))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// Error envelope, built by [`crate::error::AppError`].
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub data: ErrorDetail,
}

impl ErrorBody {
    pub fn new(code: &'static str, message: String) -> Self {
        Self {
            status: STATUS_ERROR,
            data: ErrorDetail { code, message },
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
