//! Access control entries and their codec.
//!
//! Grants are carried in the multi-valued `zimbraACE` attribute, one value
//! per entry in the form `<target id> <target type> [<secret>] <right>`.
//! Sending the attribute replaces the whole set on the server, and omitting
//! it leaves the set unchanged, so an empty set must be sent as an explicit
//! empty value.
//!
//! Target types and rights this library does not know are kept verbatim, so
//! a read-then-modify writes back exactly what the server returned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zimbra_soap::Element;

use crate::attr;
use crate::error::{Error, Result};

/// Attribute holding access control entries.
pub const ACE_ATTR: &str = "zimbraACE";

/// Kind of entity an entry refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetType {
    /// An account.
    Account,
    /// A class of service.
    Cos,
    /// A domain.
    Domain,
    /// A distribution list.
    DistributionList,
    /// Any other grantee type (`usr`, `grp`, `pub`, ...), kept as sent.
    Other(String),
}

impl TargetType {
    /// Returns the name used for this type inside an ACE value.
    #[must_use]
    pub fn acl_name(&self) -> &str {
        match self {
            Self::Account => "account",
            Self::Cos => "cos",
            Self::Domain => "domain",
            Self::DistributionList => "distributionlist",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for TargetType {
    fn from(name: &str) -> Self {
        match name {
            "account" => Self::Account,
            "cos" => Self::Cos,
            "domain" => Self::Domain,
            "distributionlist" => Self::DistributionList,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for TargetType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<TargetType> for String {
    fn from(target_type: TargetType) -> Self {
        target_type.acl_name().to_string()
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.acl_name())
    }
}

/// A single access control entry on an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ace {
    /// Id of the entity the right applies to.
    pub target_id: String,
    /// Kind of that entity.
    pub target_type: TargetType,
    /// Password or access key of guest and key grants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Right name (e.g. `domainAdminRights`); denied rights start with `-`.
    pub right: String,
}

impl Ace {
    /// Creates an entry.
    #[must_use]
    pub fn new(
        target_id: impl Into<String>,
        target_type: TargetType,
        right: impl Into<String>,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            target_type,
            secret: None,
            right: right.into(),
        }
    }

    /// Sets the grant secret.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Appends this entry to a request.
    pub fn apply(&self, container: &mut Element) {
        attr::write(container, ACE_ATTR, Some(self.to_string().as_str()));
    }

    /// Appends the directive that clears every entry on the server.
    pub fn delete_all(container: &mut Element) {
        attr::write_empty(container, ACE_ATTR);
    }
}

impl fmt::Display for Ace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target_id, self.target_type)?;
        if let Some(secret) = &self.secret {
            write!(f, " {secret}")?;
        }
        write!(f, " {}", self.right)
    }
}

impl FromStr for Ace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let (target_id, target_type, secret, right) = match parts.as_slice() {
            [id, kind, right] => (*id, *kind, None, *right),
            [id, kind, secret, right] => (*id, *kind, Some(*secret), *right),
            _ => return Err(Error::InvalidAce(s.to_string())),
        };
        Ok(Self {
            target_id: target_id.to_string(),
            target_type: TargetType::from(target_type),
            secret: secret.map(str::to_string),
            right: right.to_string(),
        })
    }
}

/// Reads every entry under a response node, in document order.
///
/// # Errors
///
/// Returns [`Error::InvalidAce`] if a value does not have three or four
/// fields.
pub fn read(node: &Element) -> Result<Vec<Ace>> {
    attr::read_all(node, ACE_ATTR)
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .map(str::parse::<Ace>)
        .collect()
}

/// Writes a full set of entries: one node per entry, or a single clearing
/// node when the set is empty.
pub fn write_all(container: &mut Element, acls: &[Ace]) {
    if acls.is_empty() {
        Ace::delete_all(container);
    } else {
        for ace in acls {
            ace.apply(container);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn ace_nodes(request: &Element) -> Vec<&Element> {
        request
            .children_named(attr::NODE)
            .filter(|a| a.attr(attr::KEY) == Some(ACE_ATTR))
            .collect()
    }

    #[test]
    fn test_ace_format() {
        let ace = Ace::new("d-1", TargetType::Domain, "domainAdminRights");
        assert_eq!(ace.to_string(), "d-1 domain domainAdminRights");
        assert_eq!("d-1 domain domainAdminRights".parse::<Ace>().unwrap(), ace);
    }

    #[test]
    fn test_ace_parse_rejects_malformed() {
        for value in ["", "d-1", "d-1 domain", "a b c d e"] {
            assert!(
                matches!(value.parse::<Ace>(), Err(Error::InvalidAce(_))),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_ace_keeps_unknown_grants() {
        let grantee = "6c3b-11 usr loginAs".parse::<Ace>().unwrap();
        assert_eq!(grantee.target_type, TargetType::Other("usr".to_string()));
        assert_eq!(grantee.right, "loginAs");
        assert_eq!(grantee.to_string(), "6c3b-11 usr loginAs");

        let guest = "guest@example.net gst p4ss -viewFreeBusy".parse::<Ace>().unwrap();
        assert_eq!(guest.secret.as_deref(), Some("p4ss"));
        assert_eq!(guest.right, "-viewFreeBusy");
        assert_eq!(guest.to_string(), "guest@example.net gst p4ss -viewFreeBusy");
    }

    #[test]
    fn test_target_type_names() {
        assert_eq!(TargetType::Account.acl_name(), "account");
        assert_eq!(
            TargetType::from("distributionlist"),
            TargetType::DistributionList
        );
        assert_eq!(TargetType::from("cos"), TargetType::Cos);
        assert_eq!(TargetType::from("COS"), TargetType::Other("COS".to_string()));
        assert_eq!(TargetType::from("grp").acl_name(), "grp");
    }

    #[test]
    fn test_empty_set_emits_single_delete_all() {
        let mut request = Element::new("ModifyAccountRequest");
        write_all(&mut request, &[]);

        let nodes = ace_nodes(&request);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text(), Some(""));
    }

    #[test]
    fn test_read_skips_empty_values() {
        let mut account = Element::new("account");
        Ace::delete_all(&mut account);
        Ace::new("a-1", TargetType::Account, "loginAs").apply(&mut account);

        let acls = read(&account).unwrap();
        assert_eq!(acls, vec![Ace::new("a-1", TargetType::Account, "loginAs")]);
    }

    #[test]
    fn test_read_none() {
        assert!(read(&Element::new("account")).unwrap().is_empty());
    }

    fn ace_strategy() -> impl Strategy<Value = Ace> {
        (
            "[a-f0-9-]{1,36}",
            prop_oneof![
                Just(TargetType::Account),
                Just(TargetType::Cos),
                Just(TargetType::Domain),
                Just(TargetType::DistributionList),
                "[a-z]{2,5}".prop_map(TargetType::from),
            ],
            proptest::option::of("[a-zA-Z0-9]{1,12}"),
            "-?[a-zA-Z]{1,24}",
        )
            .prop_map(|(id, target_type, secret, right)| Ace {
                secret,
                ..Ace::new(id, target_type, right)
            })
    }

    proptest! {
        #[test]
        fn prop_one_directive_per_entry(acls in prop::collection::vec(ace_strategy(), 1..8)) {
            let mut request = Element::new("ModifyAccountRequest");
            write_all(&mut request, &acls);

            let nodes = ace_nodes(&request);
            prop_assert_eq!(nodes.len(), acls.len());
            prop_assert!(nodes.iter().all(|n| !n.text().unwrap_or_default().is_empty()));
            prop_assert_eq!(read(&request).unwrap(), acls);
        }
    }
}
