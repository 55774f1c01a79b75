//! XML namespace handling
//!
//! Qualified names and the scoped prefix bindings used to resolve them.

use crate::names::split_qname;
use std::collections::HashMap;
use std::fmt;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Check whether this name lives in the given namespace
    pub fn is_in(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// In-scope namespace bindings of one element
///
/// A child context starts as a copy of its parent's, so lookups never need to
/// walk up the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI
    prefixes: HashMap<Prefix, NamespaceUri>,
    /// Default namespace (no prefix)
    default_namespace: Option<NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the context of a child element
    pub fn child(&self) -> Self {
        self.clone()
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace; an empty URI undeclares it
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        self.default_namespace = if namespace.is_empty() {
            None
        } else {
            Some(namespace)
        };
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(crate::XML_NAMESPACE);
        }
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Resolve a possibly prefixed name to a QName
    ///
    /// Unprefixed names take the default namespace. Returns `None` when the
    /// prefix is not bound.
    pub fn resolve(&self, prefixed_name: &str) -> Option<QName> {
        match split_qname(prefixed_name) {
            (Some(prefix), local) => self
                .get_namespace(prefix)
                .map(|namespace| QName::namespaced(namespace, local)),
            (None, local) => Some(QName::new(self.default_namespace.clone(), local)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname_display() {
        let qname = QName::namespaced("http://example.com", "element");
        assert_eq!(qname.to_string(), "{http://example.com}element");

        let qname_local = QName::local("element");
        assert_eq!(qname_local.to_string(), "element");
    }

    #[test]
    fn test_child_context_inherits() {
        let mut ctx = NamespaceContext::new();
        ctx.add_prefix("xs", crate::XSD_NAMESPACE);

        let mut child = ctx.child();
        child.set_default_namespace("http://example.com");

        assert_eq!(child.get_namespace("xs"), Some(crate::XSD_NAMESPACE));
        assert_eq!(child.get_default_namespace(), Some("http://example.com"));
        assert_eq!(ctx.get_default_namespace(), None);
    }

    #[test]
    fn test_resolve_prefixed_name() {
        let mut ctx = NamespaceContext::new();
        ctx.add_prefix("xs", crate::XSD_NAMESPACE);

        let qname = ctx.resolve("xs:element").unwrap();
        assert!(qname.is_in(crate::XSD_NAMESPACE));
        assert_eq!(qname.local_name, "element");

        assert!(ctx.resolve("xsd:element").is_none());
        assert_eq!(ctx.resolve("element"), Some(QName::local("element")));
    }

    #[test]
    fn test_empty_default_namespace_undeclares() {
        let mut ctx = NamespaceContext::new();
        ctx.set_default_namespace("http://example.com");
        ctx.set_default_namespace("");
        assert_eq!(ctx.get_default_namespace(), None);
    }
}
