//! Liveness check for the load balancer, mounted at the root.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub service: &'static str,
    pub version: &'static str,
    /// `up` when `SELECT 1` succeeds on the pool.
    pub database: &'static str,
}

/// GET /health
///
/// 200 with the success envelope while PostgreSQL answers, 503 otherwise so
/// the instance is taken out of rotation.
async fn health(State(state): State<AppState>) -> Response {
    let database_up = match pethaven_db::health_check(state.store.pool()).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    };

    let report = ApiResponse::ok(HealthReport {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        database: if database_up { "up" } else { "down" },
    });
    if database_up {
        report.into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, report).into_response()
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
