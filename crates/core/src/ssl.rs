//! Pure parts of the SSL check: target parsing and the issuer guess.
//!
//! The handshake itself happens in the API layer. Certificate details are
//! not exposed by the HTTP client, so the issuer is inferred from well-known
//! hosting domains and reported as a guess.

use serde::Serialize;
use url::Url;

use crate::types::Timestamp;

/// Protocol reported for a successful check. The client only negotiates
/// TLS 1.2 or 1.3.
pub const PROTOCOL_TLS: &str = "TLS 1.2+";

pub const ISSUER_UNKNOWN: &str = "Unknown";

/// Outcome of one SSL check.
#[derive(Debug, Clone, Serialize)]
pub struct SslReport {
    pub valid: bool,
    pub hostname: String,
    pub issuer: String,
    pub protocol: Option<String>,
    pub checked_at: Timestamp,
    pub error: Option<String>,
}

impl SslReport {
    pub fn valid(hostname: &str, checked_at: Timestamp) -> Self {
        Self {
            valid: true,
            hostname: hostname.to_string(),
            issuer: guess_issuer(hostname).to_string(),
            protocol: Some(PROTOCOL_TLS.to_string()),
            checked_at,
            error: None,
        }
    }

    pub fn invalid(hostname: &str, checked_at: Timestamp, error: impl Into<String>) -> Self {
        Self {
            valid: false,
            hostname: hostname.to_string(),
            issuer: ISSUER_UNKNOWN.to_string(),
            protocol: None,
            checked_at,
            error: Some(error.into()),
        }
    }
}

/// Extract the host of an `https://` URL.
///
/// Returns the host (without port, IPv6 literals keep their brackets) or a
/// message describing why the URL cannot be checked.
pub fn https_host(url: &str) -> Result<String, String> {
    let parsed = Url::parse(url.trim()).map_err(|e| format!("Invalid URL: {e}"))?;
    if parsed.scheme() != "https" {
        return Err("URL must use https".to_string());
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err("URL has no host".to_string()),
    }
}

const KNOWN_ISSUERS: &[(&str, &str)] = &[
    (".vercel.app", "Let's Encrypt"),
    (".netlify.app", "Let's Encrypt"),
    (".github.io", "Let's Encrypt"),
    (".pages.dev", "Google Trust Services"),
    (".workers.dev", "Google Trust Services"),
    (".web.app", "Google Trust Services"),
    (".firebaseapp.com", "Google Trust Services"),
    (".cloudfront.net", "Amazon"),
    (".amazonaws.com", "Amazon"),
    (".azurewebsites.net", "Microsoft"),
];

/// Best-effort issuer name for `hostname`.
pub fn guess_issuer(hostname: &str) -> &'static str {
    KNOWN_ISSUERS
        .iter()
        .find(|(suffix, _)| hostname.ends_with(suffix))
        .map(|(_, issuer)| *issuer)
        .unwrap_or(ISSUER_UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_host() {
        assert_eq!(https_host("https://SeatFinder.vercel.app/search?x=1").unwrap(), "seatfinder.vercel.app");
        assert_eq!(https_host("https://user@example.com:8443").unwrap(), "example.com");
        assert_eq!(https_host("  HTTPS://ju.ac.bd  ").unwrap(), "ju.ac.bd");
    }

    #[test]
    fn keeps_ipv6_literal_whole() {
        assert_eq!(https_host("https://[::1]:8443/health").unwrap(), "[::1]");
    }

    #[test]
    fn rejects_non_https() {
        assert_eq!(https_host("http://example.com").unwrap_err(), "URL must use https");
        assert!(https_host("example.com").unwrap_err().starts_with("Invalid URL"));
        assert!(https_host("https://").is_err());
    }

    #[test]
    fn issuer_guess_by_suffix() {
        assert_eq!(guess_issuer("seatfinder.vercel.app"), "Let's Encrypt");
        assert_eq!(guess_issuer("ju.ac.bd"), ISSUER_UNKNOWN);
    }
}
