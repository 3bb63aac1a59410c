//! SOAP fault model.
//!
//! Zimbra reports errors as SOAP 1.2 faults with a service-specific code in
//! the detail block:
//!
//! ```text
//! <soap:Fault>
//!   <soap:Code><soap:Value>soap:Sender</soap:Value></soap:Code>
//!   <soap:Reason><soap:Text>no such account: bob@example.com</soap:Text></soap:Reason>
//!   <soap:Detail>
//!     <Error xmlns="urn:zimbra"><Code>account.NO_SUCH_ACCOUNT</Code></Error>
//!   </soap:Detail>
//! </soap:Fault>
//! ```

use std::fmt;

use crate::element::Element;

/// Prefix of the detail code segment used for "entity does not exist" faults.
const NOT_FOUND_PREFIX: &str = "NO_SUCH_";

/// A fault returned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// SOAP fault code (e.g. `soap:Sender`).
    pub code: String,
    /// Human-readable reason.
    pub reason: String,
    /// Service error code from the detail block (e.g. `account.NO_SUCH_ACCOUNT`).
    pub error_code: Option<String>,
}

impl Fault {
    /// Creates a fault without a detail code.
    #[must_use]
    pub fn new(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            reason: reason.into(),
            error_code: None,
        }
    }

    /// Sets the service error code.
    #[must_use]
    pub fn with_error_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = Some(error_code.into());
        self
    }

    /// Extracts a fault from a `Fault` element.
    ///
    /// Missing parts are left empty rather than rejected, since the fault
    /// itself is the error being reported.
    #[must_use]
    pub fn from_element(fault: &Element) -> Self {
        let code = fault
            .child("Code")
            .and_then(|c| c.child("Value"))
            .and_then(Element::text)
            .unwrap_or_default();
        let reason = fault
            .child("Reason")
            .and_then(|r| r.child("Text"))
            .and_then(Element::text)
            .unwrap_or_default();
        let error_code = fault
            .child("Detail")
            .and_then(|d| d.child("Error"))
            .and_then(|e| e.child("Code"))
            .and_then(Element::text)
            .map(str::to_string);

        Self {
            code: code.to_string(),
            reason: reason.to_string(),
            error_code,
        }
    }

    /// Returns true if the fault says the requested entity does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.error_code.as_deref().is_some_and(|code| {
            code.rsplit('.')
                .next()
                .is_some_and(|last| last.starts_with(NOT_FOUND_PREFIX))
        })
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_code {
            Some(code) => write!(f, "{code}: {}", self.reason),
            None => write!(f, "{}: {}", self.code, self.reason),
        }
    }
}
