//! Account management module.
//!
//! Provides the account model, request builders, response parsers and the
//! [`AccountService`] that ties them to a transport.

mod model;
pub mod request;
pub mod response;
mod service;

pub use model::{Account, AccountBuilder, AccountId, AccountStatus};
pub use service::{AccountService, ListOptions};

/// Class of service id.
pub const COS_ID: &str = "zimbraCOSId";
/// Delegated admin flag (`TRUE`/`FALSE`).
pub const DELEGATED_ADMIN: &str = "zimbraIsDelegatedAdminAccount";
/// Mailbox quota in bytes.
pub const MAIL_QUOTA: &str = "zimbraMailQuota";
/// Account status.
pub const STATUS: &str = "zimbraAccountStatus";
/// Creation time (generalized time).
pub const CREATED_AT: &str = "zimbraCreateTimestamp";
/// Last login time (generalized time).
pub const LAST_LOGIN_AT: &str = "zimbraLastLogonTimestamp";
