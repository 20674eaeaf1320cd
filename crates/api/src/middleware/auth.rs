//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use seatfinder_core::error::CoreError;
use seatfinder_core::types::UserId;

use crate::auth::jwt::{validate_token, Claims, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id at the auth provider (from `claims.sub`).
    pub user_id: UserId,
    /// Provider-level role claim.
    pub role: String,
}

/// Why a request carries no usable credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerError {
    Missing,
    Malformed,
    Invalid,
}

impl BearerError {
    fn message(self) -> &'static str {
        match self {
            BearerError::Missing => "Missing Authorization header",
            BearerError::Malformed => "Invalid Authorization format. Expected: Bearer <token>",
            BearerError::Invalid => "Invalid or expired token",
        }
    }
}

/// Validate the bearer token in `headers`.
///
/// Shared by [`AuthUser`] and the function endpoints, which need the same
/// check but answer with their own error bodies.
pub fn claims_from_headers(headers: &HeaderMap, jwt: &JwtConfig) -> Result<Claims, BearerError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(BearerError::Missing)?;
    let token = header.strip_prefix("Bearer ").ok_or(BearerError::Malformed)?;
    validate_token(token.trim(), jwt).map_err(|_| BearerError::Invalid)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_from_headers(&parts.headers, &state.config.jwt)
            .map_err(|e| AppError::Core(CoreError::Unauthorized(e.message().into())))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
