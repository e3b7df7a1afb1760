//! Error types for table-link.
//!
//! Every operation has its own error variant. Each wraps a [`Failure`] that
//! records whether the server answered with a non-success status, the
//! exchange never completed, or the success body could not be decoded.

use thiserror::Error;

/// Result type for table-link operations
pub type Result<T> = std::result::Result<T, TableLinkError>;

/// Why a single HTTP exchange did not produce the expected result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// The server answered with a non-2xx status. Displays the body verbatim.
    #[error("{body}")]
    Server { status: u16, body: String },

    /// The request never completed (connection refused, timeout, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// A 2xx response whose body was not the expected JSON
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Failure::Decode(err.to_string())
        } else {
            Failure::Transport(err.to_string())
        }
    }
}

/// Errors returned by [`crate::TableClient`].
#[derive(Debug, Error)]
pub enum TableLinkError {
    #[error("Failed to create table: {0}")]
    CreateTable(Failure),

    #[error("Failed to insert row: {0}")]
    Insert(Failure),

    #[error("Failed to select rows: {0}")]
    Select(Failure),

    #[error("Failed to update rows: {0}")]
    Update(Failure),

    #[error("Failed to delete rows: {0}")]
    Delete(Failure),

    /// A precondition was violated before any request was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client construction failed (bad base URL, HTTP client setup)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl TableLinkError {
    /// The exchange failure behind an operation error, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::CreateTable(f)
            | Self::Insert(f)
            | Self::Select(f)
            | Self::Update(f)
            | Self::Delete(f) => Some(f),
            Self::InvalidRequest(_) | Self::ConfigurationError(_) => None,
        }
    }

    /// HTTP status of the server's rejection, when there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self.failure() {
            Some(Failure::Server { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// The wrapped message without the operation prefix.
    ///
    /// For server rejections this is the response body exactly as received.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) | Self::ConfigurationError(msg) => msg.clone(),
            _ => self.failure().map(ToString::to_string).unwrap_or_default(),
        }
    }

    /// True when the request never reached a server response.
    pub fn is_transport(&self) -> bool {
        matches!(self.failure(), Some(Failure::Transport(_)))
    }
}
