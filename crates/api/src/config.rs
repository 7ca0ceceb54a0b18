use pethaven_core::sorting::SortDefaults;

use crate::auth::jwt::JwtConfig;

/// Default number of reports after which a post is blocked automatically.
const DEFAULT_MODERATION_REPORT_THRESHOLD: i64 = 10;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. TLS is terminated by the reverse proxy, so the server only
/// speaks plain HTTP.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Sort applied to list endpoints when the request has none.
    pub default_sort: SortDefaults,
    /// Report count that auto-blocks a post; `0` disables auto-blocking.
    pub moderation_report_threshold: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `DEFAULT_SORT`                | `created_at:desc`       |
    /// | `MODERATION_REPORT_THRESHOLD` | `10`                    |
    ///
    /// JWT variables are documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_sort = SortDefaults::from_expr(
            &std::env::var("DEFAULT_SORT").unwrap_or_else(|_| "created_at:desc".into()),
        )
        .expect("DEFAULT_SORT must look like 'field:asc' or 'field:desc'");

        let moderation_report_threshold: i64 = std::env::var("MODERATION_REPORT_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_MODERATION_REPORT_THRESHOLD.to_string())
            .parse()
            .expect("MODERATION_REPORT_THRESHOLD must be a valid i64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            default_sort,
            moderation_report_threshold,
        }
    }
}
