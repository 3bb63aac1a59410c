//! Navigable XML element tree.
//!
//! Requests are built as [`Element`] trees and serialized with `quick-xml`;
//! responses are parsed back into the same tree so callers can walk them by
//! local name without caring about namespace prefixes.

use std::fmt;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Error, Result};

/// An XML element with ordered attributes, children and text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Self>,
    text: Option<String>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates an element holding text content.
    #[must_use]
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Adds an attribute, builder style.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Sets an attribute, replacing an existing one with the same key.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
        self
    }

    /// Appends a text child and returns it for further decoration.
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.push(Self::with_text(name, text))
    }

    /// Appends a child element and returns it.
    pub fn push(&mut self, child: Self) -> &mut Self {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Returns the qualified name (including any prefix).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name without its namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Looks up an attribute by exact key or by local name.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .or_else(|| self.attributes.iter().find(|(k, _)| local_part(k) == key))
            .map(|(_, v)| v.as_str())
    }

    /// Returns all attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the direct children.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the first direct child with the given local name.
    #[must_use]
    pub fn child(&self, local_name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.local_name() == local_name)
    }

    /// Iterates over direct children with the given local name.
    pub fn children_named<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Self> {
        self.children
            .iter()
            .filter(move |c| c.local_name() == local_name)
    }

    /// Returns the first element (self included) with the given local name, depth-first.
    #[must_use]
    pub fn find(&self, local_name: &str) -> Option<&Self> {
        if self.local_name() == local_name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(local_name))
    }

    /// Returns every element (self included) with the given local name, in document order.
    #[must_use]
    pub fn find_all(&self, local_name: &str) -> Vec<&Self> {
        let mut found = Vec::new();
        self.collect(local_name, &mut found);
        found
    }

    fn collect<'a>(&'a self, local_name: &str, found: &mut Vec<&'a Self>) {
        if self.local_name() == local_name {
            found.push(self);
        }
        for child in &self.children {
            child.collect(local_name, found);
        }
    }

    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// Serializes the element to an XML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(encode)
    }

    pub(crate) fn write(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.text.is_none() {
            writer.write_event(Event::Empty(start)).map_err(encode)?;
            return Ok(());
        }

        writer.write_event(Event::Start(start)).map_err(encode)?;
        if let Some(text) = &self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(encode)?;
        }
        for child in &self.children {
            child.write(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(encode)?;
        Ok(())
    }

    /// Parses an XML document into its root element.
    ///
    /// Declarations, comments and processing instructions are skipped.
    /// Whitespace around text content is trimmed.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed XML, unbalanced tags, or a
    /// document without a root element.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Self> = Vec::new();
        let mut root: Option<Self> = None;

        loop {
            let position = usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX);
            match reader.read_event() {
                Ok(Event::Start(start)) => stack.push(Self::from_start(&start, position)?),
                Ok(Event::Empty(start)) => {
                    let element = Self::from_start(&start, position)?;
                    attach(&mut stack, &mut root, element, position)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::parse(position, "unexpected end tag"))?;
                    attach(&mut stack, &mut root, element, position)?;
                }
                Ok(Event::Text(text)) => {
                    let text = text
                        .unescape()
                        .map_err(|e| Error::parse(position, e.to_string()))?;
                    if let Some(current) = stack.last_mut() {
                        current.append_text(&text);
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(current) = stack.last_mut() {
                        current.append_text(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::parse(position, e.to_string())),
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::parse(
                xml.len(),
                format!("unclosed element <{}>", open.name),
            ));
        }
        root.ok_or_else(|| Error::parse(xml.len(), "document has no root element"))
    }

    fn from_start(start: &BytesStart<'_>, position: usize) -> Result<Self> {
        let mut element = Self::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::parse(position, e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::parse(position, e.to_string()))?;
            element.attributes.push((key, value.into_owned()));
        }
        Ok(element)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_xml() {
            Ok(xml) => f.write_str(&xml),
            Err(_) => write!(f, "<{}/>", self.name),
        }
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    position: usize,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::parse(position, "multiple root elements"));
    }
    *root = Some(element);
    Ok(())
}

fn local_part(name: &str) -> &str {
    name.split_once(':').map_or(name, |(_, local)| local)
}

fn encode(e: impl fmt::Display) -> Error {
    Error::Encode(e.to_string())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::needless_collect
)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_build_and_serialize() {
        let mut request = Element::new("GetAccountRequest").with_attr("xmlns", "urn:zimbraAdmin");
        request
            .add("account", "bob@example.com")
            .set_attr("by", "name");

        assert_eq!(
            request.to_xml().unwrap(),
            r#"<GetAccountRequest xmlns="urn:zimbraAdmin"><account by="name">bob@example.com</account></GetAccountRequest>"#
        );
    }

    #[test]
    fn test_empty_element_and_empty_text() {
        assert_eq!(Element::new("nosession").to_xml().unwrap(), "<nosession/>");
        assert_eq!(
            Element::with_text("a", "").with_attr("n", "zimbraACE").to_xml().unwrap(),
            r#"<a n="zimbraACE"></a>"#
        );
    }

    #[test]
    fn test_escaping() {
        let element = Element::with_text("name", "a<b & \"c\"").with_attr("n", "x<y");
        let xml = element.to_xml().unwrap();
        assert!(xml.contains("&lt;"));
        assert!(xml.contains("&amp;"));

        let parsed = Element::parse(&xml).unwrap();
        assert_eq!(parsed.text(), Some("a<b & \"c\""));
        assert_eq!(parsed.attr("n"), Some("x<y"));
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut element = Element::new("domain");
        element.set_attr("by", "id");
        element.set_attr("by", "name");
        assert_eq!(element.attributes().len(), 1);
        assert_eq!(element.attr("by"), Some("name"));
    }

    #[test]
    fn test_parse_navigation() {
        let xml = r#"<?xml version="1.0"?>
            <soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope">
              <!-- comment -->
              <soap:Body>
                <GetAllAccountsResponse xmlns="urn:zimbraAdmin">
                  <account id="1" name="a@example.com"><a n="zimbraMailQuota">10</a></account>
                  <account id="2" name="b@example.com"/>
                </GetAllAccountsResponse>
              </soap:Body>
            </soap:Envelope>"#;

        let root = Element::parse(xml).unwrap();
        assert_eq!(root.name(), "soap:Envelope");
        assert_eq!(root.local_name(), "Envelope");
        assert_eq!(root.attr("xmlns:soap"), Some("http://www.w3.org/2003/05/soap-envelope"));

        let body = root.child("Body").unwrap();
        let response = body.children().first().unwrap();
        assert_eq!(response.local_name(), "GetAllAccountsResponse");

        let accounts = root.find_all("account");
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].attr("id"), Some("1"));
        assert_eq!(accounts[1].attr("name"), Some("b@example.com"));

        let quota = accounts[0].children_named("a").next().unwrap();
        assert_eq!(quota.attr("n"), Some("zimbraMailQuota"));
        assert_eq!(quota.text(), Some("10"));
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn test_parse_cdata() {
        let root = Element::parse("<v><![CDATA[<raw> & text]]></v>").unwrap();
        assert_eq!(root.text(), Some("<raw> & text"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Element::parse(""), Err(Error::Parse { .. })));
        assert!(matches!(Element::parse("<a><b></a>"), Err(Error::Parse { .. })));
        assert!(matches!(Element::parse("<a>"), Err(Error::Parse { .. })));
        assert!(matches!(Element::parse("<a/><b/>"), Err(Error::Parse { .. })));
    }

    proptest! {
        #[test]
        fn prop_text_and_attr_survive_escaping(
            text in "[a-zA-Z0-9<>&\"' ]{0,24}",
            attr in "[a-zA-Z0-9<>&\"' ]{0,24}",
        ) {
            let element = Element::with_text("v", text.clone()).with_attr("n", attr.clone());
            let parsed = Element::parse(&element.to_xml().unwrap()).unwrap();
            prop_assert_eq!(parsed.text().unwrap_or(""), text.trim());
            prop_assert_eq!(parsed.attr("n"), Some(attr.as_str()));
        }
    }
}
