//! Account response parsers.

use zimbra_soap::Element;

use super::model::{Account, AccountId, AccountStatus};
use super::{COS_ID, CREATED_AT, DELEGATED_ADMIN, LAST_LOGIN_AT, MAIL_QUOTA, STATUS};
use crate::acl;
use crate::attr;
use crate::error::{Error, Result};

/// Element name of an account node.
const ACCOUNT: &str = "account";

/// Parses one `<account id=".." name="..">` node.
///
/// # Errors
///
/// Returns an error if `id`, `name` or the creation timestamp is missing, or
/// if any attribute value cannot be converted.
pub fn account(node: &Element) -> Result<Account> {
    let id = node
        .attr("id")
        .ok_or_else(|| Error::MissingAttribute("id".to_string()))?;
    let name = node
        .attr("name")
        .ok_or_else(|| Error::MissingAttribute("name".to_string()))?;

    Ok(Account {
        id: Some(AccountId::new(id)),
        name: name.to_string(),
        password: None,
        acls: acl::read(node)?,
        cos_id: attr::read_string(node, COS_ID),
        delegated_admin: attr::read_bool(node, DELEGATED_ADMIN)?,
        mail_quota: attr::read_u64(node, MAIL_QUOTA)?,
        status: attr::read_string(node, STATUS).map(AccountStatus::from),
        created_at: Some(attr::read_timestamp(node, CREATED_AT)?),
        last_login_at: attr::read_optional_timestamp(node, LAST_LOGIN_AT)?,
    })
}

/// Parses the first account node in a response body.
///
/// # Errors
///
/// Returns [`Error::MissingElement`] if the body has no account node.
pub fn first_account(body: &Element) -> Result<Account> {
    body.find(ACCOUNT)
        .ok_or(Error::MissingElement(ACCOUNT))
        .and_then(account)
}

/// Parses every account node in a response body, in document order.
///
/// # Errors
///
/// Returns the first error from any node.
pub fn all_accounts(body: &Element) -> Result<Vec<Account>> {
    body.find_all(ACCOUNT).into_iter().map(account).collect()
}
