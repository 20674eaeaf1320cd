use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use seatfinder_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `seatfinder_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::ReadOnly(_) => (StatusCode::FORBIDDEN, "READ_ONLY", core.to_string()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Whether a database error is the caller's fault and safe to show verbatim.
///
/// SQLSTATE classes 22 (data exception), 23 (integrity constraint) and 42
/// (syntax error or access rule violation) describe the submitted data or
/// statement, never server internals.
pub fn is_client_database_error(code: &str) -> bool {
    code.starts_with("22") || code.starts_with("23") || code.starts_with("42")
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (`23505`) map to 409 with the backend message.
/// - Other data, constraint and statement errors map to 400 with the backend
///   message verbatim.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
            if code == "23505" {
                return (StatusCode::CONFLICT, "CONFLICT", db_err.message().to_string());
            }
            if is_client_database_error(&code) {
                return (
                    StatusCode::BAD_REQUEST,
                    "DATABASE_ERROR",
                    db_err.message().to_string(),
                );
            }
            tracing::error!(error = %db_err, code = %code, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Function errors
// ---------------------------------------------------------------------------

/// Errors from the `/functions/v1` endpoints.
///
/// These keep the bare `{"error": "<message>"}` body that function callers
/// expect, without the `code` field of [`AppError`].
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: admin access required")]
    Forbidden,

    #[error("{}", seatfinder_core::sql_gate::ERR_NOT_PERMITTED)]
    NotPermitted,

    /// Malformed request body.
    #[error("{0}")]
    BadRequest(String),

    /// The database rejected the statement; the message is passed through.
    #[error("{0}")]
    Backend(String),

    #[error("Internal server error")]
    Internal,
}

impl From<sqlx::Error> for FunctionError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => FunctionError::Backend(db_err.message().to_string()),
            decode @ (sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. }) => {
                FunctionError::Backend(decode.to_string())
            }
            other => {
                tracing::error!(error = %other, "Function database error");
                FunctionError::Internal
            }
        }
    }
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        let status = match &self {
            FunctionError::Unauthorized => StatusCode::UNAUTHORIZED,
            FunctionError::Forbidden | FunctionError::NotPermitted => StatusCode::FORBIDDEN,
            FunctionError::BadRequest(_) | FunctionError::Backend(_) => StatusCode::BAD_REQUEST,
            FunctionError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, axum::Json(json!({ "error": self.to_string() }))).into_response()
    }
}
