//! XML document parsing
//!
//! Turns raw input bytes into an immutable element tree. Anything that is not
//! a single well-formed XML element tree fails with [`Error::MalformedXml`].

use crate::error::{Error, ParseError, Result};
use crate::limits::Limits;
use crate::namespaces::{NamespaceContext, QName};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element qualified name, namespace resolved
    pub qname: QName,
    /// Prefix used in the source, if any
    pub prefix: Option<String>,
    /// Element attributes in document order
    pub attributes: IndexMap<QName, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// In-scope namespace bindings for this element
    pub namespaces: NamespaceContext,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            prefix: None,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
            namespaces: NamespaceContext::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace.as_deref()
    }

    /// Check namespace and local name at once
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.qname.is_in(namespace) && self.qname.local_name == local_name
    }

    /// Get an unqualified attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&QName::local(name))
            .map(|s| s.as_str())
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Append text content
    pub fn append_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// Iterate over child elements in a given namespace
    pub fn children_in<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |e| e.qname.is_in(namespace))
    }
}

/// XML Document representation
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Root element of the document
    pub root: Element,
}

impl Document {
    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Parse an XML document from bytes with default limits
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Self::parse_with_limits(xml, &Limits::default())
    }

    /// Parse an XML document from bytes
    pub fn parse_with_limits(xml: &[u8], limits: &Limits) -> Result<Self> {
        limits.check_input_size(xml.len())?;

        let xml = xml.strip_prefix(UTF8_BOM).unwrap_or(xml);
        std::str::from_utf8(xml).map_err(|e| {
            ParseError::new(format!("input is not valid UTF-8: {}", e))
                .with_position(e.valid_up_to())
        })?;

        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut root: Option<Element> = None;
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if root.is_some() && element_stack.is_empty() {
                        return Err(misplaced("second root element", position));
                    }
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let scope = element_stack.last().map(|p| &p.namespaces);
                    let element = Self::parse_element(&e, scope, position)?;
                    element_stack.push(element);
                }
                Ok(Event::End(_)) => {
                    let current = element_stack
                        .pop()
                        .ok_or_else(|| misplaced("closing tag without opening tag", position))?;
                    match element_stack.last_mut() {
                        Some(parent) => parent.add_child(current),
                        None => root = Some(current),
                    }
                }
                Ok(Event::Empty(e)) => {
                    if root.is_some() && element_stack.is_empty() {
                        return Err(misplaced("second root element", position));
                    }
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let scope = element_stack.last().map(|p| &p.namespaces);
                    let element = Self::parse_element(&e, scope, position)?;
                    match element_stack.last_mut() {
                        Some(parent) => parent.add_child(element),
                        None => root = Some(element),
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|e| {
                        ParseError::new(format!("failed to unescape text: {}", e))
                            .with_position(position)
                    })?;
                    match element_stack.last_mut() {
                        Some(current) => current.append_text(&text),
                        None if text.trim().is_empty() => {}
                        None => return Err(misplaced("text outside the root element", position)),
                    }
                }
                Ok(Event::CData(e)) => {
                    let bytes = e.into_inner();
                    let text = std::str::from_utf8(&bytes).map_err(|e| {
                        ParseError::new(format!("invalid CDATA: {}", e)).with_position(position)
                    })?;
                    match element_stack.last_mut() {
                        Some(current) => current.append_text(text),
                        None => return Err(misplaced("CDATA outside the root element", position)),
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ParseError::new(format!("error parsing XML: {}", e))
                        .with_position(reader.buffer_position())
                        .into())
                }
                // Declarations, comments, processing instructions and doctypes carry no structure
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = element_stack.last() {
            return Err(ParseError::new(format!(
                "unexpected end of input: <{}> is not closed",
                open.local_name()
            ))
            .with_position(reader.buffer_position())
            .into());
        }

        let root = root.ok_or_else(|| ParseError::new("document has no root element"))?;
        Ok(Document { root })
    }

    /// Parse element from BytesStart event
    fn parse_element(
        start: &BytesStart,
        parent_scope: Option<&NamespaceContext>,
        position: usize,
    ) -> Result<Element> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| ParseError::new(format!("invalid element name: {}", e)))?
            .to_string();

        let mut namespaces = parent_scope.map(NamespaceContext::child).unwrap_or_default();
        let mut attributes = Vec::new();

        for attr_result in start.attributes() {
            let attr = attr_result.map_err(|e| {
                ParseError::new(format!("failed to parse attribute: {}", e)).with_position(position)
            })?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| ParseError::new(format!("invalid attribute name: {}", e)))?
                .to_string();

            let attr_value = attr
                .unescape_value()
                .map_err(|e| {
                    ParseError::new(format!("failed to unescape attribute value: {}", e))
                        .with_position(position)
                })?
                .to_string();

            // Namespace declarations apply to the element that carries them
            if attr_name == "xmlns" {
                namespaces.set_default_namespace(attr_value);
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                namespaces.add_prefix(prefix, attr_value);
            } else {
                attributes.push((attr_name, attr_value));
            }
        }

        let (prefix, qname) = match name.split_once(':') {
            Some((prefix, _)) => {
                let qname = namespaces.resolve(&name).ok_or_else(|| {
                    ParseError::new(format!("unbound namespace prefix '{}'", prefix))
                        .with_position(position)
                })?;
                (Some(prefix.to_string()), qname)
            }
            None => (None, QName::new(namespaces.get_default_namespace(), name.as_str())),
        };

        let mut element = Element::new(qname);
        element.prefix = prefix;

        for (attr_name, attr_value) in attributes {
            // Unprefixed attributes are in no namespace
            let attr_qname = match attr_name.split_once(':') {
                Some((prefix, _)) => namespaces.resolve(&attr_name).ok_or_else(|| {
                    ParseError::new(format!("unbound namespace prefix '{}'", prefix))
                        .with_position(position)
                })?,
                None => QName::local(attr_name),
            };
            if element.attributes.insert(attr_qname, attr_value).is_some() {
                return Err(ParseError::new("duplicate attribute")
                    .with_position(position)
                    .into());
            }
        }

        element.namespaces = namespaces;
        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> &Element {
        &self.root
    }
}

fn misplaced(what: &str, position: usize) -> Error {
    ParseError::new(what).with_position(position).into()
}
