//! # zimbra-soap
//!
//! SOAP plumbing for the Zimbra admin API.
//!
//! ## Features
//!
//! - **Element tree**: build requests and walk responses by local name,
//!   serialized and parsed with `quick-xml`
//! - **SOAP 1.2 envelopes**: auth-token header context, body extraction
//! - **Typed faults**: service error codes such as `account.NO_SUCH_ACCOUNT`
//!   with a not-found check
//! - **Transport seam**: the [`Transport`] trait, with an authenticated
//!   `reqwest` implementation in [`HttpTransport`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use zimbra_soap::{Config, HttpTransport, Transport, admin_request};
//!
//! #[tokio::main]
//! async fn main() -> zimbra_soap::Result<()> {
//!     let config = Config::new("mail.example.com", "admin@example.com", "secret");
//!     let transport = HttpTransport::connect(&config).await?;
//!
//!     let mut request = admin_request("GetAccountRequest");
//!     request.add("account", "bob@example.com").set_attr("by", "name");
//!
//!     match transport.invoke(request).await {
//!         Ok(response) => println!("{response}"),
//!         Err(e) if e.is_not_found() => println!("no such account"),
//!         Err(e) => return Err(e),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod element;
pub mod envelope;
mod error;
pub mod fault;
pub mod transport;

pub use config::{Config, ConfigBuilder, Security};
pub use element::Element;
pub use envelope::{ADMIN_NS, Envelope, admin_request, parse_response};
pub use error::{Error, Result};
pub use fault::Fault;
pub use transport::{HttpTransport, Transport};
