//! # zimbra-admin
//!
//! Typed account management over the Zimbra admin SOAP API.
//!
//! This crate provides:
//! - The [`Account`] model with its access control entries
//! - The attribute codec mapping typed fields to `<a n="...">` nodes
//! - Request builders and response parsers for account operations
//! - [`AccountService`] for list/get/create/modify/delete over any
//!   [`zimbra_soap::Transport`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use zimbra_admin::{Account, AccountService, ListOptions};
//! use zimbra_soap::{Config, HttpTransport};
//!
//! #[tokio::main]
//! async fn main() -> zimbra_admin::Result<()> {
//!     let config = Config::new("mail.example.com", "admin@example.com", "secret");
//!     let service = AccountService::new(HttpTransport::connect(&config).await?);
//!
//!     let account = Account::builder("alice@example.com")
//!         .password("initial-password")
//!         .mail_quota(5_000_000)
//!         .build();
//!     let mut account = service.create(&account).await?;
//!
//!     account.delegated_admin = true;
//!     service.modify(&account).await?;
//!
//!     for account in service.list(&ListOptions::by_domain("example.com")).await? {
//!         println!("{} {:?}", account.name, account.id());
//!     }
//!
//!     if let Some(account) = service.get_by_name("alice@example.com").await? {
//!         service.delete(&account).await?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod acl;
pub mod attr;
mod error;

pub use account::{Account, AccountBuilder, AccountId, AccountService, AccountStatus, ListOptions};
pub use acl::{Ace, TargetType};
pub use error::{Error, Result};
