//! Owned XML element tree
//!
//! The OpenLS responses are deeply nested and only loosely follow their
//! schemas, so the decoders navigate a small in-memory tree by qualified
//! element name (`prefix:local`, exactly as the service writes it) instead of
//! deserializing into fixed structs.

use quick_xml::{Reader, events::BytesStart, events::Event};
use tracing::debug;

use crate::error::OpenLsError;

/// An XML element with its attributes, text content and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Self>,
}

impl XmlElement {
    /// Parse a document into a tree
    ///
    /// The returned element is a nameless document node whose children are
    /// the top-level elements, so paths start at the root element name.
    ///
    /// # Errors
    ///
    /// Returns [`OpenLsError::DecodeError`] if the document is not well formed
    /// or has no root element.
    pub fn parse_document(xml: &str) -> Result<Self, OpenLsError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack = vec![Self::default()];
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => stack.push(Self::from_start(&e)?),
                Ok(Event::Empty(e)) => {
                    let element = Self::from_start(&e)?;
                    push_child(&mut stack, element);
                },
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| OpenLsError::DecodeError(e.to_string()))?;
                    append_text(&mut stack, &text);
                },
                Ok(Event::CData(e)) => {
                    let text = std::str::from_utf8(e.as_ref())
                        .map_err(|e| OpenLsError::DecodeError(e.to_string()))?;
                    append_text(&mut stack, text);
                },
                Ok(Event::End(_)) => {
                    if stack.len() < 2 {
                        return Err(OpenLsError::DecodeError(
                            "unbalanced closing tag".to_string(),
                        ));
                    }
                    if let Some(element) = stack.pop() {
                        push_child(&mut stack, element);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    debug!(error = ?e, "XML parsing error in OpenLS response");
                    return Err(OpenLsError::DecodeError(format!(
                        "XML error at position {}: {e}",
                        reader.buffer_position()
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        if stack.len() != 1 {
            return Err(OpenLsError::DecodeError(
                "unexpected end of document".to_string(),
            ));
        }
        let document = stack.pop().unwrap_or_default();
        if document.children.is_empty() {
            return Err(OpenLsError::DecodeError(
                "document has no root element".to_string(),
            ));
        }
        Ok(document)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, OpenLsError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| OpenLsError::DecodeError(e.to_string()))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| OpenLsError::DecodeError(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    /// Qualified element name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content, trimmed
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value of an attribute by qualified name
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All child elements with the given name, in document order
    pub fn children<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Self> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// First child element with the given name
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children(name).next()
    }

    /// First child with the given name whose attribute `key` equals `value`
    #[must_use]
    pub fn child_with_attribute(&self, name: &str, key: &str, value: &str) -> Option<&Self> {
        self.children(name)
            .find(|child| child.attribute(key) == Some(value))
    }

    /// Follow a path of element names, taking the first match at each step
    #[must_use]
    pub fn descend(&self, path: &[&str]) -> Option<&Self> {
        path.iter()
            .try_fold(self, |element, name| element.child(name))
    }
}

fn push_child(stack: &mut [XmlElement], element: XmlElement) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    }
}

fn append_text(stack: &mut [XmlElement], text: &str) {
    if let Some(current) = stack.last_mut() {
        current.text.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <xls:XLS xmlns:xls="http://www.opengis.net/xls" version="1.1">
            <xls:Address countryCode="DE">
                <xls:Place type="Country">Deutschland</xls:Place>
                <xls:Place type="Municipality">Bonn</xls:Place>
                <xls:PostalCode>53125</xls:PostalCode>
                <xls:Street officialName="Meckenheimer &amp; Allee"/>
            </xls:Address>
        </xls:XLS>"#;

    #[test]
    fn parses_nested_elements() {
        let document = XmlElement::parse_document(SAMPLE).unwrap();
        let address = document.descend(&["xls:XLS", "xls:Address"]).unwrap();
        assert_eq!(address.attribute("countryCode"), Some("DE"));
        assert_eq!(address.children("xls:Place").count(), 2);
        assert_eq!(address.child("xls:PostalCode").unwrap().text(), "53125");
    }

    #[test]
    fn finds_child_by_attribute() {
        let document = XmlElement::parse_document(SAMPLE).unwrap();
        let address = document.descend(&["xls:XLS", "xls:Address"]).unwrap();
        let city = address
            .child_with_attribute("xls:Place", "type", "Municipality")
            .unwrap();
        assert_eq!(city.text(), "Bonn");
        assert!(
            address
                .child_with_attribute("xls:Place", "type", "CountrySubdivision")
                .is_none()
        );
    }

    #[test]
    fn unescapes_attributes() {
        let document = XmlElement::parse_document(SAMPLE).unwrap();
        let street = document
            .descend(&["xls:XLS", "xls:Address", "xls:Street"])
            .unwrap();
        assert_eq!(street.attribute("officialName"), Some("Meckenheimer & Allee"));
        assert_eq!(street.name(), "xls:Street");
    }

    #[test]
    fn missing_path_is_none() {
        let document = XmlElement::parse_document(SAMPLE).unwrap();
        assert!(document.descend(&["xls:XLS", "xls:Response"]).is_none());
        assert!(document.descend(&["aas:AAS"]).is_none());
    }

    #[test]
    fn empty_path_is_the_document() {
        let document = XmlElement::parse_document(SAMPLE).unwrap();
        assert_eq!(document.descend(&[]), Some(&document));
    }

    #[test]
    fn rejects_mismatched_tags() {
        let result = XmlElement::parse_document("<a><b></a></b>");
        assert!(matches!(result, Err(OpenLsError::DecodeError(_))));
    }

    #[test]
    fn rejects_unclosed_document() {
        let result = XmlElement::parse_document("<a><b></b>");
        assert!(matches!(result, Err(OpenLsError::DecodeError(_))));
    }

    #[test]
    fn rejects_document_without_root() {
        assert!(XmlElement::parse_document("").is_err());
        assert!(XmlElement::parse_document("not xml at all").is_err());
    }

    #[test]
    fn reads_cdata() {
        let document = XmlElement::parse_document("<a><![CDATA[x < y]]></a>").unwrap();
        assert_eq!(document.child("a").unwrap().text(), "x < y");
    }
}
