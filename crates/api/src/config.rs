use seatfinder_core::sql_gate::GateMode;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins for `/api/v1`, from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT validation settings.
    pub jwt: JwtConfig,
    /// Statement gate applied by the privileged SQL gateway.
    pub sql_gate_mode: GateMode,
    /// Timeout for the SSL check's outbound HEAD request (default: `10`).
    pub ssl_check_timeout_secs: u64,
    /// Origin probed by the SSL check when the request names none.
    pub site_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                  |
    /// |--------------------------|--------------------------|
    /// | `HOST`                   | `0.0.0.0`                |
    /// | `PORT`                   | `3000`                   |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                     |
    /// | `SQL_GATE_MODE`          | `denylist`               |
    /// | `SSL_CHECK_TIMEOUT_SECS` | `10`                     |
    /// | `SITE_URL`               | `http://localhost:5173`  |
    ///
    /// `JWT_SECRET` is read by [`JwtConfig::from_env`].
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

        let sql_gate_mode: GateMode = std::env::var("SQL_GATE_MODE")
            .unwrap_or_else(|_| "denylist".into())
            .parse()
            .unwrap_or_else(|e| panic!("Invalid SQL_GATE_MODE: {e}"));

        let ssl_check_timeout_secs: u64 = std::env::var("SSL_CHECK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("SSL_CHECK_TIMEOUT_SECS must be a valid u64");

        let site_url =
            std::env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:5173".into());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            sql_gate_mode,
            ssl_check_timeout_secs,
            site_url,
        }
    }
}
