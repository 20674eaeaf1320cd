use seatfinder_core::error::CoreError;

/// Errors surfaced by the console to the person at the keyboard.
///
/// `Api` carries the server's message verbatim; it is what the banner shows.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured server address cannot be turned into an endpoint.
    #[error("Invalid server URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    #[error("Table '{0}' is read-only")]
    ReadOnly(String),

    #[error("No table selected")]
    NoTable,
}

impl ConsoleError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<CoreError> for ConsoleError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ConsoleError::Validation(msg),
            CoreError::ReadOnly(table) => ConsoleError::ReadOnly(table),
            other => ConsoleError::Validation(other.to_string()),
        }
    }
}
