//! Error types for the admin library.

use thiserror::Error;

/// Errors that can occur in admin operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure or server fault.
    #[error("SOAP error: {0}")]
    Soap(#[from] zimbra_soap::Error),

    /// Response did not contain an expected element.
    #[error("Response is missing <{0}>")]
    MissingElement(&'static str),

    /// A mandatory attribute was absent.
    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    /// An attribute value could not be converted.
    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidAttribute {
        /// Attribute name.
        name: String,
        /// Raw value from the response.
        value: String,
        /// Why conversion failed.
        reason: String,
    },

    /// An access control entry did not have three or four fields.
    #[error("Invalid ACE {0:?}")]
    InvalidAce(String),

    /// Operation requires a server-assigned account id.
    #[error("Account has no id")]
    MissingId,
}

impl Error {
    /// Creates an invalid-attribute error.
    #[must_use]
    pub fn invalid_attribute(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the server reported that the target entity does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Soap(e) if e.is_not_found())
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
