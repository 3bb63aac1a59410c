//! SOAP 1.2 envelope encoding and decoding.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, Event};

use crate::element::Element;
use crate::error::{Error, Result};
use crate::fault::Fault;

/// SOAP 1.2 envelope namespace.
pub const SOAP_NS: &str = "http://www.w3.org/2003/05/soap-envelope";

/// Namespace of the header context block.
pub const ZIMBRA_NS: &str = "urn:zimbra";

/// Namespace of admin requests and responses.
pub const ADMIN_NS: &str = "urn:zimbraAdmin";

/// Content type for SOAP 1.2 requests.
pub const SOAP_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

/// Creates an empty admin request element, e.g. `<GetAccountRequest xmlns="urn:zimbraAdmin"/>`.
#[must_use]
pub fn admin_request(name: &str) -> Element {
    Element::new(name).with_attr("xmlns", ADMIN_NS)
}

/// An outgoing SOAP envelope.
#[derive(Debug, Clone)]
pub struct Envelope {
    auth_token: Option<String>,
    body: Element,
}

impl Envelope {
    /// Creates an unauthenticated envelope around a body element.
    #[must_use]
    pub const fn new(body: Element) -> Self {
        Self {
            auth_token: None,
            body,
        }
    }

    /// Attaches an auth token to the header context.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Returns the body element.
    #[must_use]
    pub const fn body(&self) -> &Element {
        &self.body
    }

    fn to_element(&self) -> Element {
        let mut envelope = Element::new("soap:Envelope").with_attr("xmlns:soap", SOAP_NS);

        if let Some(token) = &self.auth_token {
            let mut context = Element::new("context").with_attr("xmlns", ZIMBRA_NS);
            context.add("authToken", token.as_str());
            context.push(Element::new("nosession"));
            envelope.push(Element::new("soap:Header")).push(context);
        }

        envelope
            .push(Element::new("soap:Body"))
            .push(self.body.clone());
        envelope
    }

    /// Serializes the envelope with an XML declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| Error::Encode(e.to_string()))?;
        self.to_element().write(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| Error::Encode(e.to_string()))
    }
}

/// Decodes a response envelope into its body content.
///
/// # Errors
///
/// Returns [`Error::Fault`] if the body holds a fault, or a parse error if the
/// document is not an envelope with body content.
pub fn parse_response(xml: &str) -> Result<Element> {
    let root = Element::parse(xml)?;
    if root.local_name() != "Envelope" {
        return Err(Error::parse(
            0,
            format!("expected soap:Envelope, found <{}>", root.name()),
        ));
    }

    let content = root
        .child("Body")
        .and_then(|body| body.children().first())
        .ok_or_else(|| Error::parse(0, "response envelope has no body content"))?;

    if content.local_name() == "Fault" {
        return Err(Error::Fault(Fault::from_element(content)));
    }
    Ok(content.clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_envelope() {
        let mut body = admin_request("DeleteAccountRequest");
        body.add("id", "abc-123");
        let xml = Envelope::new(body).with_auth_token("tok&1").to_xml().unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<context xmlns="urn:zimbra"><authToken>tok&amp;1</authToken><nosession/></context>"#));
        assert!(xml.contains(
            r#"<soap:Body><DeleteAccountRequest xmlns="urn:zimbraAdmin"><id>abc-123</id></DeleteAccountRequest></soap:Body>"#
        ));
    }

    #[test]
    fn test_unauthenticated_envelope_has_no_header() {
        let xml = Envelope::new(admin_request("AuthRequest")).to_xml().unwrap();
        assert!(!xml.contains("soap:Header"));
        assert!(xml.contains("<soap:Body>"));
    }

    #[test]
    fn test_parse_response_body() {
        let xml = r#"<soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope">
              <soap:Header><context xmlns="urn:zimbra"/></soap:Header>
              <soap:Body><DeleteAccountResponse xmlns="urn:zimbraAdmin"/></soap:Body>
            </soap:Envelope>"#;
        let body = parse_response(xml).unwrap();
        assert_eq!(body.local_name(), "DeleteAccountResponse");
    }

    #[test]
    fn test_parse_response_fault() {
        let xml = r#"<soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope">
              <soap:Body><soap:Fault>
                <soap:Code><soap:Value>soap:Sender</soap:Value></soap:Code>
                <soap:Reason><soap:Text>no such account: x</soap:Text></soap:Reason>
                <soap:Detail><Error xmlns="urn:zimbra"><Code>account.NO_SUCH_ACCOUNT</Code></Error></soap:Detail>
              </soap:Fault></soap:Body>
            </soap:Envelope>"#;
        let err = parse_response(xml).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.fault().unwrap().reason, "no such account: x");
    }

    #[test]
    fn test_parse_response_rejects_non_envelope() {
        assert!(matches!(
            parse_response("<html><body>502</body></html>"),
            Err(Error::Parse { .. })
        ));
        assert!(matches!(
            parse_response(r#"<soap:Envelope xmlns:soap="x"><soap:Body/></soap:Envelope>"#),
            Err(Error::Parse { .. })
        ));
    }
}
