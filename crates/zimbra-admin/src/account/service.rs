//! Account service.
//!
//! One request/response exchange per operation. The service holds nothing
//! but its transport, so a single instance can be shared freely.

use zimbra_soap::Transport;

use super::model::{Account, AccountId};
use super::{request, response};
use crate::error::{Error, Result};

/// Options for [`AccountService::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Only list accounts in this domain (by name).
    pub by_domain: Option<String>,
}

impl ListOptions {
    /// Lists accounts in one domain.
    #[must_use]
    pub fn by_domain(domain: impl Into<String>) -> Self {
        Self {
            by_domain: Some(domain.into()),
        }
    }
}

/// Account operations over an admin transport.
#[derive(Debug, Clone)]
pub struct AccountService<T> {
    transport: T,
}

impl<T: Transport> AccountService<T> {
    /// Creates a service over the given transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Lists accounts, optionally limited to one domain.
    ///
    /// # Errors
    ///
    /// Returns an error on any fault or if a returned account cannot be parsed.
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Account>> {
        let body = self
            .transport
            .invoke(request::get_all(options.by_domain.as_deref()))
            .await?;
        let accounts = response::all_accounts(&body)?;
        tracing::debug!(
            domain = options.by_domain.as_deref(),
            count = accounts.len(),
            "Listed accounts"
        );
        Ok(accounts)
    }

    /// Looks up an account by id; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any fault other than not-found.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Account>> {
        self.lookup(request::get_by_id(id)).await
    }

    /// Looks up an account by name; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any fault other than not-found.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Account>> {
        self.lookup(request::get_by_name(name)).await
    }

    async fn lookup(&self, request: zimbra_soap::Element) -> Result<Option<Account>> {
        match self.transport.invoke(request).await {
            Ok(body) => response::first_account(&body).map(Some),
            Err(e) if e.is_not_found() => {
                tracing::debug!(fault = %e, "Account not found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Creates an account and returns it as stored by the server.
    ///
    /// # Errors
    ///
    /// Returns an error on any fault (e.g. the account already exists).
    pub async fn create(&self, account: &Account) -> Result<Account> {
        let body = self.transport.invoke(request::create(account)).await?;
        let created = response::first_account(&body)?;
        tracing::debug!(
            name = %created.name,
            id = created.id().map(AccountId::as_str),
            "Created account"
        );
        Ok(created)
    }

    /// Saves the account's modifiable attributes and returns the updated account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingId`] if the account has no id, or an error on any fault.
    pub async fn modify(&self, account: &Account) -> Result<Account> {
        let body = self.transport.invoke(request::modify(account)?).await?;
        let modified = response::first_account(&body)?;
        tracing::debug!(name = %modified.name, "Modified account");
        Ok(modified)
    }

    /// Deletes the account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingId`] if the account has no id, or an error on
    /// any fault, including not-found.
    pub async fn delete(&self, account: &Account) -> Result<()> {
        let id = account.id().ok_or(Error::MissingId)?;
        self.transport.invoke(request::delete(id)).await?;
        tracing::debug!(id = %id, "Deleted account");
        Ok(())
    }
}
