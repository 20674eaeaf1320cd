//! Handlers for the `/functions/v1` endpoints.
//!
//! These answer with bare `{"error": ...}` bodies via [`FunctionError`] and
//! carry their own permissive CORS policy (see `routes::functions`).

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use seatfinder_core::roles::grants_elevated_sql;
use seatfinder_core::sql_gate;
use seatfinder_core::ssl::{https_host, SslReport};
use seatfinder_core::value::Row;
use seatfinder_db::models::keep_alive_log::{CreateKeepAliveLog, STATUS_ERROR, STATUS_SUCCESS};
use seatfinder_db::repositories::{KeepAliveLogRepo, RoleRepo, SqlExecRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::FunctionError;
use crate::middleware::auth::claims_from_headers;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ExecuteSqlRequest {
    pub sql: String,
}

#[derive(Debug, Serialize)]
pub struct ExecuteSqlResponse {
    pub data: Vec<Row>,
    #[serde(rename = "execMs")]
    pub exec_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct KeepAliveResponse {
    pub status: String,
    pub response_time_ms: i32,
    pub error_message: Option<String>,
    pub record_count: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SslCheckRequest {
    #[validate(length(min = 1, max = 2048))]
    pub url: Option<String>,
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Privileged SQL execution
// ---------------------------------------------------------------------------

/// POST /functions/v1/execute-sql
///
/// Gates run in a fixed order and stop at the first failure:
/// token (401), role (403), body, statement gate (403), execution (400 on
/// a backend error). The body is only parsed once the caller is known to be
/// an admin, so unauthenticated and unprivileged callers get the same answer
/// whatever they send.
pub async fn execute_sql(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ExecuteSqlResponse>, FunctionError> {
    let claims = claims_from_headers(&headers, &state.config.jwt)
        .map_err(|_| FunctionError::Unauthorized)?;

    let roles = RoleRepo::role_names(&state.pool, claims.sub)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Role lookup failed");
            FunctionError::Internal
        })?;
    if !grants_elevated_sql(&roles) {
        tracing::warn!(user_id = %claims.sub, "Privileged SQL refused: no admin role");
        return Err(FunctionError::Forbidden);
    }

    let request: ExecuteSqlRequest = serde_json::from_slice(&body)
        .map_err(|_| FunctionError::BadRequest("Request body must be {\"sql\": string}".into()))?;
    if request.sql.trim().is_empty() {
        return Err(FunctionError::BadRequest("SQL statement is required".into()));
    }

    if let Err(rejected) = sql_gate::check(&request.sql, state.config.sql_gate_mode) {
        tracing::warn!(
            user_id = %claims.sub,
            rule = rejected.rule,
            mode = ?state.config.sql_gate_mode,
            "Privileged SQL refused by statement gate",
        );
        return Err(FunctionError::NotPermitted);
    }

    let start = Instant::now();
    let data = SqlExecRepo::execute(&state.pool, &request.sql).await?;
    let exec_ms = elapsed_ms(start);

    tracing::info!(user_id = %claims.sub, rows = data.len(), exec_ms, "Privileged SQL executed");
    Ok(Json(ExecuteSqlResponse { data, exec_ms }))
}

// ---------------------------------------------------------------------------
// Keep-alive
// ---------------------------------------------------------------------------

/// POST /functions/v1/keep-alive
///
/// One count over `site_settings`, timed, appended to `keep_alive_logs`.
/// A failed probe answers 500 with the same body shape.
pub async fn keep_alive(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let probe = KeepAliveLogRepo::count_settings(&state.pool).await;
    let response_time_ms = i32::try_from(elapsed_ms(start)).unwrap_or(i32::MAX);

    let (status, entry) = match probe {
        Ok(count) => (
            StatusCode::OK,
            CreateKeepAliveLog {
                status: STATUS_SUCCESS.to_string(),
                response_time_ms,
                error_message: None,
                record_count: Some(count),
            },
        ),
        Err(e) => {
            tracing::error!(error = %e, "Keep-alive probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                CreateKeepAliveLog {
                    status: STATUS_ERROR.to_string(),
                    response_time_ms,
                    error_message: Some(e.to_string()),
                    record_count: None,
                },
            )
        }
    };

    if let Err(e) = KeepAliveLogRepo::create(&state.pool, &entry).await {
        tracing::warn!(error = %e, "Failed to record keep-alive result");
    }

    (
        status,
        Json(KeepAliveResponse {
            status: entry.status,
            response_time_ms: entry.response_time_ms,
            error_message: entry.error_message,
            record_count: entry.record_count,
        }),
    )
}

// ---------------------------------------------------------------------------
// SSL check
// ---------------------------------------------------------------------------

/// POST /functions/v1/ssl-check
///
/// Body `{"url": "..."}`; an empty body checks the configured site URL.
/// Reachability over HTTPS with a trusted certificate counts as valid.
pub async fn ssl_check(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SslReport>, FunctionError> {
    let request: SslCheckRequest = if body.is_empty() {
        SslCheckRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|_| FunctionError::BadRequest("Request body must be {\"url\": string}".into()))?
    };
    request
        .validate()
        .map_err(|e| FunctionError::BadRequest(e.to_string()))?;

    let url = request.url.unwrap_or_else(|| state.config.site_url.clone());
    let checked_at = chrono::Utc::now();

    let host = match https_host(&url) {
        Ok(host) => host,
        Err(message) => return Ok(Json(SslReport::invalid(&url, checked_at, message))),
    };

    let result = state
        .http
        .head(&url)
        .timeout(Duration::from_secs(state.config.ssl_check_timeout_secs))
        .send()
        .await;

    let report = match result {
        Ok(_) => SslReport::valid(&host, checked_at),
        Err(e) => {
            tracing::info!(host = %host, error = %e, "SSL check failed");
            SslReport::invalid(&host, checked_at, e.to_string())
        }
    };
    Ok(Json(report))
}
