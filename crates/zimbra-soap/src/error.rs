//! Error types for the SOAP layer.

use thiserror::Error;

use crate::fault::Fault;

/// Errors that can occur while talking to the admin SOAP endpoint.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status and a body that is not a SOAP envelope.
    #[error("Unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (possibly truncated).
        body: String,
    },

    /// XML parsing error.
    #[error("XML error at position {position}: {message}")]
    Parse {
        /// Byte position where the error occurred.
        position: usize,
        /// Description of what went wrong.
        message: String,
    },

    /// XML serialization error.
    #[error("XML encoding error: {0}")]
    Encode(String),

    /// The server reported a SOAP fault.
    #[error("SOAP fault: {0}")]
    Fault(Fault),

    /// Authentication failed or returned no token.
    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl Error {
    /// Creates a parse error at the given position.
    #[must_use]
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Returns the fault carried by this error, if any.
    #[must_use]
    pub const fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// Returns true if the server reported that the target entity does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.fault().is_some_and(Fault::is_not_found)
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
