//! Authentication primitives.
//!
//! Sign-in and sign-out belong to the external auth provider. The server
//! only validates the HS256 access tokens it issues.
//!
//! - [`jwt`] -- JWT validation (and generation, for tooling and tests).

pub mod jwt;
