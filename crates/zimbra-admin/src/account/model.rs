//! Account model types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::acl::Ace;

/// Server-assigned account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Wraps an id string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Account status (`zimbraAccountStatus`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountStatus {
    /// Normal operation.
    Active,
    /// Temporarily unavailable for maintenance.
    Maintenance,
    /// Login disabled, mail still delivered.
    Locked,
    /// Locked after too many failed logins.
    LockOut,
    /// Awaiting activation.
    Pending,
    /// Login disabled and mail rejected.
    Closed,
    /// A value this library does not know about.
    Other(String),
}

impl AccountStatus {
    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Locked => "locked",
            Self::LockOut => "lockout",
            Self::Pending => "pending",
            Self::Closed => "closed",
            Self::Other(value) => value,
        }
    }

    /// Returns true if the account can log in.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<&str> for AccountStatus {
    fn from(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "maintenance" => Self::Maintenance,
            "locked" => Self::Locked,
            "lockout" => Self::LockOut,
            "pending" => Self::Pending,
            "closed" => Self::Closed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for AccountStatus {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<AccountStatus> for String {
    fn from(status: AccountStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directory account.
///
/// Server-assigned fields (`id`, `created_at`, `last_login_at`) are only
/// populated from responses; they are serialized but ignored when
/// deserializing. The password is write-only: it is sent on create but
/// never read back or serialized.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(skip_deserializing)]
    pub(crate) id: Option<AccountId>,
    /// Login name / primary address.
    pub name: String,
    /// Initial password (create only).
    #[serde(skip)]
    pub password: Option<String>,
    /// Access control entries, in order.
    #[serde(default)]
    pub acls: Vec<Ace>,
    /// Class of service id.
    pub cos_id: Option<String>,
    /// Whether the account is a delegated administrator.
    #[serde(default)]
    pub delegated_admin: bool,
    /// Mailbox quota in bytes; `None` or `0` means unlimited.
    pub mail_quota: Option<u64>,
    /// Status; only sent on modify when set.
    pub status: Option<AccountStatus>,
    #[serde(skip_deserializing)]
    pub(crate) created_at: Option<DateTime<Utc>>,
    #[serde(skip_deserializing)]
    pub(crate) last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Target type name of accounts inside ACE values.
    pub const ACL_NAME: &'static str = "account";

    /// Creates a builder for a new account.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AccountBuilder {
        AccountBuilder::new(name)
    }

    /// Refers to an existing account by id, e.g. to delete it without a lookup.
    #[must_use]
    pub fn existing(id: impl Into<AccountId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the server-assigned id.
    #[must_use]
    pub const fn id(&self) -> Option<&AccountId> {
        self.id.as_ref()
    }

    /// Returns when the account was created.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the last login time; `None` until the first login.
    #[must_use]
    pub const fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Returns the quota in bytes, `0` meaning unlimited.
    #[must_use]
    pub fn mail_quota_bytes(&self) -> u64 {
        self.mail_quota.unwrap_or(0)
    }

    /// Returns true if the mailbox has no quota.
    #[must_use]
    pub fn has_unlimited_quota(&self) -> bool {
        self.mail_quota_bytes() == 0
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("acls", &self.acls)
            .field("cos_id", &self.cos_id)
            .field("delegated_admin", &self.delegated_admin)
            .field("mail_quota", &self.mail_quota)
            .field("status", &self.status)
            .field("created_at", &self.created_at)
            .field("last_login_at", &self.last_login_at)
            .finish()
    }
}

/// Builder for client-side accounts.
#[derive(Debug, Clone)]
pub struct AccountBuilder {
    account: Account,
}

impl AccountBuilder {
    /// Creates a builder with the given login name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            account: Account {
                name: name.into(),
                ..Account::default()
            },
        }
    }

    /// Sets the initial password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.account.password = Some(password.into());
        self
    }

    /// Sets the class of service by id.
    #[must_use]
    pub fn cos_id(mut self, cos_id: impl Into<String>) -> Self {
        self.account.cos_id = Some(cos_id.into());
        self
    }

    /// Sets the mailbox quota in bytes.
    #[must_use]
    pub const fn mail_quota(mut self, bytes: u64) -> Self {
        self.account.mail_quota = Some(bytes);
        self
    }

    /// Marks the account as a delegated administrator.
    #[must_use]
    pub const fn delegated_admin(mut self, delegated_admin: bool) -> Self {
        self.account.delegated_admin = delegated_admin;
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn status(mut self, status: AccountStatus) -> Self {
        self.account.status = Some(status);
        self
    }

    /// Adds one access control entry.
    #[must_use]
    pub fn acl(mut self, ace: Ace) -> Self {
        self.account.acls.push(ace);
        self
    }

    /// Adds several access control entries.
    #[must_use]
    pub fn acls(mut self, acls: impl IntoIterator<Item = Ace>) -> Self {
        self.account.acls.extend(acls);
        self
    }

    /// Builds the account.
    #[must_use]
    pub fn build(self) -> Account {
        self.account
    }
}
