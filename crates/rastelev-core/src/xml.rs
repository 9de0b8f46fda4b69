//! XML element builder and attribute readers.
//!
//! Writing goes through [`XmlElement`], a small owned tree that is emitted
//! with `quick_xml`. Reading is done on `roxmltree` nodes, with helpers that
//! return `None` for absent or unparsable attributes so callers can fall back
//! to defaults.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use roxmltree::Node;
use std::fmt;
use std::str::FromStr;

/// An XML element under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Tag name of this element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an attribute, replacing any previous value with the same key.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Look up an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append a child element.
    pub fn append_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Builder form of [`append_child`](Self::append_child).
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.append_child(child);
        self
    }

    /// Child elements in insertion order.
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Emit this element and its children through a quick-xml writer.
    ///
    /// Attribute values are escaped by the writer.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if self.children.is_empty() {
            return writer.write_event(Event::Empty(start));
        }
        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer).map_err(|_| fmt::Error)?;
        let text = String::from_utf8(writer.into_inner()).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Find the first child element of `node` with the given tag name.
pub fn first_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
}

/// Parse an attribute with `FromStr`, returning `None` if absent or invalid.
pub fn parse_attribute<T: FromStr>(node: Node<'_, '_>, key: &str) -> Option<T> {
    node.attribute(key).and_then(|v| v.trim().parse().ok())
}

/// Read a boolean attribute written as `1`/`0` (also accepts `true`/`false`).
pub fn bool_attribute(node: Node<'_, '_>, key: &str) -> Option<bool> {
    match node.attribute(key)?.trim() {
        "1" => Some(true),
        "0" => Some(false),
        other if other.eq_ignore_ascii_case("true") => Some(true),
        other if other.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Encode a boolean the way [`bool_attribute`] reads it.
pub fn encode_bool(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
