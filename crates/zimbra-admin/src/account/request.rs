//! Account request builders.

use zimbra_soap::{Element, admin_request};

use super::model::{Account, AccountId, AccountStatus};
use super::{COS_ID, DELEGATED_ADMIN, MAIL_QUOTA, STATUS};
use crate::acl;
use crate::attr;
use crate::error::{Error, Result};

/// `GetAllAccountsRequest`, optionally scoped to a domain by name.
#[must_use]
pub fn get_all(domain: Option<&str>) -> Element {
    let mut request = admin_request("GetAllAccountsRequest");
    if let Some(domain) = domain {
        request.add("domain", domain).set_attr("by", "name");
    }
    request
}

/// `GetAccountRequest` selecting the account by id.
#[must_use]
pub fn get_by_id(id: &str) -> Element {
    get(id, "id")
}

/// `GetAccountRequest` selecting the account by name.
#[must_use]
pub fn get_by_name(name: &str) -> Element {
    get(name, "name")
}

fn get(value: &str, by: &str) -> Element {
    let mut request = admin_request("GetAccountRequest");
    request.add("account", value).set_attr("by", by);
    request
}

/// `CreateAccountRequest` with name, password, class of service and quota.
///
/// The id is never sent; the server assigns it.
#[must_use]
pub fn create(account: &Account) -> Element {
    let mut request = admin_request("CreateAccountRequest");
    request.add("name", account.name.as_str());
    if let Some(password) = &account.password {
        request.add("password", password.as_str());
    }
    attr::write(&mut request, COS_ID, account.cos_id.as_deref());
    attr::write_u64(&mut request, MAIL_QUOTA, account.mail_quota);
    request
}

/// `ModifyAccountRequest` carrying the id and every modifiable attribute.
///
/// # Errors
///
/// Returns [`Error::MissingId`] if the account has no id.
pub fn modify(account: &Account) -> Result<Element> {
    let id = account.id().ok_or(Error::MissingId)?;
    let mut request = admin_request("ModifyAccountRequest");
    request.add("id", id.as_str());
    modify_attributes(&mut request, account);
    Ok(request)
}

/// Writes the attribute deltas of a modify request.
pub fn modify_attributes(request: &mut Element, account: &Account) {
    acl::write_all(request, &account.acls);
    attr::write(request, COS_ID, account.cos_id.as_deref());
    attr::write_bool(request, DELEGATED_ADMIN, account.delegated_admin);
    attr::write_u64(request, MAIL_QUOTA, account.mail_quota);
    attr::write(request, STATUS, account.status.as_ref().map(AccountStatus::as_str));
}

/// `DeleteAccountRequest` carrying only the id.
#[must_use]
pub fn delete(id: &AccountId) -> Element {
    let mut request = admin_request("DeleteAccountRequest");
    request.add("id", id.as_str());
    request
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreadable_literal)]
mod tests {
    use super::*;
    use crate::acl::{Ace, TargetType};

    fn attrs(request: &Element) -> Vec<(&str, &str)> {
        request
            .children_named(attr::NODE)
            .map(|a| (a.attr(attr::KEY).unwrap(), a.text().unwrap_or_default()))
            .collect()
    }

    #[test]
    fn test_get_all_with_domain() {
        let request = get_all(Some("example.com"));
        assert_eq!(request.name(), "GetAllAccountsRequest");
        assert_eq!(request.attr("xmlns"), Some("urn:zimbraAdmin"));

        let domain = request.child("domain").unwrap();
        assert_eq!(domain.attr("by"), Some("name"));
        assert_eq!(domain.text(), Some("example.com"));
    }

    #[test]
    fn test_get_all_without_domain() {
        let request = get_all(None);
        assert!(request.child("domain").is_none());
        assert!(request.children().is_empty());
    }

    #[test]
    fn test_get_selectors() {
        let by_id = get_by_id("abc-123");
        assert_eq!(by_id.name(), "GetAccountRequest");
        let account = by_id.child("account").unwrap();
        assert_eq!((account.attr("by"), account.text()), (Some("id"), Some("abc-123")));

        let by_name = get_by_name("bob@example.com");
        let account = by_name.child("account").unwrap();
        assert_eq!(
            (account.attr("by"), account.text()),
            (Some("name"), Some("bob@example.com"))
        );
    }

    #[test]
    fn test_create() {
        let account = Account::builder("alice@example.com")
            .password("s3cret")
            .cos_id("cos-1")
            .mail_quota(5000000)
            .delegated_admin(true)
            .build();
        let request = create(&account);

        assert_eq!(request.name(), "CreateAccountRequest");
        assert_eq!(request.child("name").unwrap().text(), Some("alice@example.com"));
        assert_eq!(request.child("password").unwrap().text(), Some("s3cret"));
        assert!(request.child("id").is_none());
        assert_eq!(
            attrs(&request),
            vec![("zimbraCOSId", "cos-1"), ("zimbraMailQuota", "5000000")]
        );
    }

    #[test]
    fn test_create_minimal() {
        let request = create(&Account::builder("alice@example.com").build());
        assert!(request.child("password").is_none());
        assert!(attrs(&request).is_empty());
    }

    #[test]
    fn test_modify_requires_id() {
        let account = Account::builder("alice@example.com").build();
        assert!(matches!(modify(&account), Err(Error::MissingId)));
    }

    #[test]
    fn test_modify_empty_acls_and_false_flag() {
        let account = Account::existing("abc-123", "alice@example.com");
        let request = modify(&account).unwrap();

        assert_eq!(request.name(), "ModifyAccountRequest");
        assert_eq!(request.child("id").unwrap().text(), Some("abc-123"));
        assert_eq!(
            attrs(&request),
            vec![
                ("zimbraACE", ""),
                ("zimbraIsDelegatedAdminAccount", "FALSE"),
            ]
        );
    }

    #[test]
    fn test_modify_full() {
        let mut account = Account::existing("abc-123", "alice@example.com");
        account.acls = vec![
            Ace::new("d-1", TargetType::Domain, "domainAdminRights"),
            Ace::new("a-2", TargetType::Account, "loginAs"),
        ];
        account.cos_id = Some("cos-1".to_string());
        account.delegated_admin = true;
        account.mail_quota = Some(1024);
        account.status = Some(AccountStatus::Locked);

        assert_eq!(
            attrs(&modify(&account).unwrap()),
            vec![
                ("zimbraACE", "d-1 domain domainAdminRights"),
                ("zimbraACE", "a-2 account loginAs"),
                ("zimbraCOSId", "cos-1"),
                ("zimbraIsDelegatedAdminAccount", "TRUE"),
                ("zimbraMailQuota", "1024"),
                ("zimbraAccountStatus", "locked"),
            ]
        );
    }

    #[test]
    fn test_delete_carries_only_id() {
        let request = delete(&AccountId::new("abc-123"));
        assert_eq!(request.name(), "DeleteAccountRequest");
        assert_eq!(request.children().len(), 1);
        assert_eq!(request.child("id").unwrap().text(), Some("abc-123"));
    }
}
