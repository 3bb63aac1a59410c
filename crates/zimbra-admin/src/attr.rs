//! Attribute codec.
//!
//! Extended properties travel as a flat list of `<a n="name">value</a>`
//! nodes. This module maps them to typed values: one lookup-and-convert
//! function per type, keyed by attribute name.

use chrono::{DateTime, NaiveDateTime, Utc};
use zimbra_soap::Element;

use crate::error::{Error, Result};

/// Element name of an attribute node.
pub const NODE: &str = "a";

/// Key attribute carrying the attribute name.
pub const KEY: &str = "n";

/// Wire literal for `true`.
pub const TRUE: &str = "TRUE";

/// Wire literal for `false`.
pub const FALSE: &str = "FALSE";

/// LDAP generalized time, e.g. `20240115093000Z`.
const GENERALIZED_TIME: &str = "%Y%m%d%H%M%SZ";

/// Generalized time with fractional seconds, e.g. `20240115093000.123Z`.
const GENERALIZED_TIME_FRACTION: &str = "%Y%m%d%H%M%S%.fZ";

/// Writes `<a n="name">value</a>`; an absent value writes nothing.
pub fn write(container: &mut Element, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        container.add(NODE, value).set_attr(KEY, name);
    }
}

/// Writes an integer attribute; an absent value writes nothing.
pub fn write_u64(container: &mut Element, name: &str, value: Option<u64>) {
    write(container, name, value.map(|v| v.to_string()).as_deref());
}

/// Writes a boolean as `TRUE`/`FALSE`. Always emits a node.
pub fn write_bool(container: &mut Element, name: &str, value: bool) {
    write(container, name, Some(bool_literal(value)));
}

/// Writes an attribute with an empty value, which clears it on the server.
pub fn write_empty(container: &mut Element, name: &str) {
    write(container, name, Some(""));
}

/// Returns the wire literal for a boolean.
#[must_use]
pub const fn bool_literal(value: bool) -> &'static str {
    if value { TRUE } else { FALSE }
}

/// Returns every value of a (possibly multi-valued) attribute, in document order.
#[must_use]
pub fn read_all<'a>(node: &'a Element, name: &str) -> Vec<&'a str> {
    node.children_named(NODE)
        .filter(|a| a.attr(KEY) == Some(name))
        .map(|a| a.text().unwrap_or_default())
        .collect()
}

/// Returns the first value of an attribute, or `None` if it is absent.
#[must_use]
pub fn read_single<'a>(node: &'a Element, name: &str) -> Option<&'a str> {
    node.children_named(NODE)
        .find(|a| a.attr(KEY) == Some(name))
        .map(|a| a.text().unwrap_or_default())
}

/// Reads a string attribute; absent or empty values are `None`.
#[must_use]
pub fn read_string(node: &Element, name: &str) -> Option<String> {
    read_single(node, name)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Reads an unsigned integer attribute; absent or empty values are `None`.
///
/// Digit strings of any length are accepted. Values beyond `u64::MAX` are
/// clamped to it.
///
/// # Errors
///
/// Returns [`Error::InvalidAttribute`] if the value is not a decimal number.
pub fn read_u64(node: &Element, name: &str) -> Result<Option<u64>> {
    match read_single(node, name).map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.bytes().all(|b| b.is_ascii_digit()) => {
            Ok(Some(value.parse().unwrap_or(u64::MAX)))
        }
        Some(value) => Err(Error::invalid_attribute(
            name,
            value,
            "expected a decimal number",
        )),
    }
}

/// Reads a `TRUE`/`FALSE` attribute; absent or empty values are `false`.
///
/// # Errors
///
/// Returns [`Error::InvalidAttribute`] for any other literal.
pub fn read_bool(node: &Element, name: &str) -> Result<bool> {
    match read_single(node, name) {
        None | Some("") => Ok(false),
        Some(TRUE) => Ok(true),
        Some(FALSE) => Ok(false),
        Some(value) => Err(Error::invalid_attribute(
            name,
            value,
            "expected TRUE or FALSE",
        )),
    }
}

/// Reads a mandatory timestamp attribute.
///
/// # Errors
///
/// Returns [`Error::MissingAttribute`] if absent or empty, or
/// [`Error::InvalidAttribute`] if the value is not a timestamp.
pub fn read_timestamp(node: &Element, name: &str) -> Result<DateTime<Utc>> {
    read_optional_timestamp(node, name)?.ok_or_else(|| Error::MissingAttribute(name.to_string()))
}

/// Reads an optional timestamp attribute; absent or empty values are `None`.
///
/// # Errors
///
/// Returns [`Error::InvalidAttribute`] if a present value is not a timestamp.
pub fn read_optional_timestamp(node: &Element, name: &str) -> Result<Option<DateTime<Utc>>> {
    match read_single(node, name) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(value)
            .map(Some)
            .ok_or_else(|| Error::invalid_attribute(name, value, "not a timestamp")),
    }
}

/// Parses generalized time (`YYYYMMDDHHMMSS[.fff]Z`), falling back to RFC 3339.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    [GENERALIZED_TIME, GENERALIZED_TIME_FRACTION]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreadable_literal)]
mod tests {
    use chrono::{Datelike, Timelike};
    use proptest::prelude::*;

    use super::*;

    fn node(attrs: &[(&str, &str)]) -> Element {
        let mut account = Element::new("account");
        for (name, value) in attrs {
            account.add(NODE, *value).set_attr(KEY, *name);
        }
        account
    }

    #[test]
    fn test_write_skips_absent() {
        let mut request = Element::new("ModifyAccountRequest");
        write(&mut request, "zimbraCOSId", None);
        write_u64(&mut request, "zimbraMailQuota", None);
        assert!(request.children().is_empty());
    }

    #[test]
    fn test_write_values() {
        let mut request = Element::new("r");
        write(&mut request, "zimbraCOSId", Some("cos-1"));
        write_u64(&mut request, "zimbraMailQuota", Some(1024));
        write_bool(&mut request, "zimbraIsDelegatedAdminAccount", false);
        write_empty(&mut request, "zimbraACE");

        assert_eq!(
            request.to_xml().unwrap(),
            concat!(
                r#"<r><a n="zimbraCOSId">cos-1</a>"#,
                r#"<a n="zimbraMailQuota">1024</a>"#,
                r#"<a n="zimbraIsDelegatedAdminAccount">FALSE</a>"#,
                r#"<a n="zimbraACE"></a></r>"#
            )
        );
    }

    #[test]
    fn test_read_single_and_all() {
        let account = node(&[
            ("zimbraACE", "first"),
            ("zimbraMailQuota", "10"),
            ("zimbraACE", "second"),
        ]);
        assert_eq!(read_single(&account, "zimbraACE"), Some("first"));
        assert_eq!(read_all(&account, "zimbraACE"), vec!["first", "second"]);
        assert_eq!(read_single(&account, "zimbraLastLogonTimestamp"), None);
        assert!(read_all(&account, "zimbraLastLogonTimestamp").is_empty());
    }

    #[test]
    fn test_read_ignores_other_children() {
        let mut account = node(&[("zimbraCOSId", "cos-1")]);
        account.add("b", "zimbraCOSId");
        assert_eq!(read_all(&account, "zimbraCOSId"), vec!["cos-1"]);
    }

    #[test]
    fn test_read_string() {
        let account = node(&[("zimbraCOSId", ""), ("zimbraAccountStatus", "active")]);
        assert_eq!(read_string(&account, "zimbraCOSId"), None);
        assert_eq!(
            read_string(&account, "zimbraAccountStatus").as_deref(),
            Some("active")
        );
    }

    #[test]
    fn test_read_u64() {
        let account = node(&[("zimbraMailQuota", "5000000"), ("bad", "12MB")]);
        assert_eq!(read_u64(&account, "zimbraMailQuota").unwrap(), Some(5000000));
        assert_eq!(read_u64(&account, "missing").unwrap(), None);
        assert!(matches!(
            read_u64(&account, "bad"),
            Err(Error::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_read_u64_clamps_long_digit_strings() {
        let account = node(&[
            ("zimbraMailQuota", "123456789012345678901234"),
            ("max", "18446744073709551615"),
            ("signed", "-5"),
        ]);
        assert_eq!(
            read_u64(&account, "zimbraMailQuota").unwrap(),
            Some(u64::MAX)
        );
        assert_eq!(read_u64(&account, "max").unwrap(), Some(u64::MAX));
        assert!(matches!(
            read_u64(&account, "signed"),
            Err(Error::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_read_bool() {
        let account = node(&[("t", "TRUE"), ("f", "FALSE"), ("x", "yes")]);
        assert!(read_bool(&account, "t").unwrap());
        assert!(!read_bool(&account, "f").unwrap());
        assert!(!read_bool(&account, "missing").unwrap());
        assert!(read_bool(&account, "x").is_err());
    }

    #[test]
    fn test_read_bool_is_case_sensitive() {
        let account = node(&[("lower", "true"), ("mixed", "False")]);
        for name in ["lower", "mixed"] {
            assert!(matches!(
                read_bool(&account, name),
                Err(Error::InvalidAttribute { .. })
            ));
        }
    }

    #[test]
    fn test_read_timestamps() {
        let account = node(&[
            ("zimbraCreateTimestamp", "20240115093000Z"),
            ("zimbraLastLogonTimestamp", ""),
            ("fraction", "20240115093000.250Z"),
            ("rfc", "2024-01-15T09:30:00+02:00"),
            ("bad", "yesterday"),
        ]);

        let created = read_timestamp(&account, "zimbraCreateTimestamp").unwrap();
        assert_eq!((created.year(), created.month(), created.day()), (2024, 1, 15));
        assert_eq!((created.hour(), created.minute()), (9, 30));

        assert_eq!(
            read_optional_timestamp(&account, "zimbraLastLogonTimestamp").unwrap(),
            None
        );
        assert_eq!(read_optional_timestamp(&account, "missing").unwrap(), None);

        let fraction = read_timestamp(&account, "fraction").unwrap();
        assert_eq!(fraction.timestamp_subsec_millis(), 250);

        let rfc = read_timestamp(&account, "rfc").unwrap();
        assert_eq!(rfc.hour(), 7);

        assert!(matches!(
            read_timestamp(&account, "missing"),
            Err(Error::MissingAttribute(_))
        ));
        assert!(matches!(
            read_timestamp(&account, "bad"),
            Err(Error::InvalidAttribute { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_quota_digits_parse(quota in any::<u64>(), zeros in 0usize..8) {
            let value = format!("{}{quota}", "0".repeat(zeros));
            let account = node(&[("zimbraMailQuota", value.as_str())]);
            prop_assert_eq!(read_u64(&account, "zimbraMailQuota").unwrap(), Some(quota));
        }

        #[test]
        fn prop_bool_literal_reads_back(value in any::<bool>()) {
            let mut account = Element::new("account");
            write_bool(&mut account, "flag", value);
            prop_assert_eq!(read_bool(&account, "flag").unwrap(), value);
        }
    }
}
