//! In-memory report tree
//!
//! Typed XML nodes built first and serialized in one pass afterwards.

/// A child of an element
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Literal text emitted as a CDATA section
    CData(String),
}

impl From<XmlElement> for XmlNode {
    fn from(element: XmlElement) -> Self {
        XmlNode::Element(element)
    }
}

/// An element with ordered attributes and children
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an attribute, overwriting an existing value in place
    pub fn set_attr(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key.to_string(), value)),
        }
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn push(&mut self, child: impl Into<XmlNode>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    pub fn push_cdata(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(XmlNode::CData(text.into()));
        self
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Child elements with the given tag name
    pub fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter_map(move |c| match c {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// First child element with the given tag name
    pub fn element(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find_map(|c| match c {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// CDATA payloads directly under this element
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|c| match c {
            XmlNode::CData(t) => Some(t.as_str()),
            _ => None,
        })
    }
}
