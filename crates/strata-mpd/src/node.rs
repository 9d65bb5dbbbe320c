//! Attribute containers handed to the coercion layer.
//!
//! The coercion layer only needs "look up an attribute by name", so any
//! node-like type can feed it through [`AttributeSource`]. [`XmlElement`] is
//! the owned form produced from a quick-xml start tag; [`collect_elements`]
//! pulls every element with a given local name out of a document.

use std::collections::{BTreeMap, HashMap};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::NodeError;

/// A node exposing its attributes by name.
pub trait AttributeSource {
    /// Raw (unescaped) value of `name`, or `None` when absent.
    fn attribute(&self, name: &str) -> Option<&str>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<T: AttributeSource + ?Sized> AttributeSource for &T {
    fn attribute(&self, name: &str) -> Option<&str> {
        (**self).attribute(name)
    }
}

// ── XmlElement ──────────────────────────────────────────────────────

/// An element's local name and its attributes in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder-style attribute insert. A repeated name replaces the old value.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Build from a quick-xml start (or empty) tag, unescaping values.
    pub fn from_start(tag: &BytesStart<'_>) -> Result<Self, NodeError> {
        let mut element = XmlElement::new(String::from_utf8_lossy(tag.local_name().as_ref()));
        for attr in tag.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            element.set_attribute(key, value);
        }
        Ok(element)
    }

    /// Local name, without any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl AttributeSource for XmlElement {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Every element named `local_name` in `xml`, in document order.
///
/// Namespace prefixes are ignored when matching, so `mpd:AdaptationSet`
/// matches `AdaptationSet`.
pub fn collect_elements(xml: &str, local_name: &str) -> Result<Vec<XmlElement>, NodeError> {
    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(tag) | Event::Empty(tag) => {
                if tag.local_name().as_ref() == local_name.as_bytes() {
                    out.push(XmlElement::from_start(&tag)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}
