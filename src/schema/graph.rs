//! Schema graph
//!
//! An arena of type definitions addressed by [`TypeId`], plus ordered name
//! tables for global types, elements and attributes. References between
//! components are kept by name and resolved on demand, so declaration order
//! does not matter and recursive types need no special representation.

use super::particles::Occurs;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// Index of a type definition in the graph arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

/// Reference from a declaration to its type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// An XSD built-in, by local name
    Builtin(String),
    /// A global type declared in the schema, by local name
    Named(String),
    /// An inline type definition
    Anonymous(TypeId),
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Builtin(name) => write!(f, "xs:{}", name),
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::Anonymous(id) => write!(f, "(anonymous #{})", id.0),
        }
    }
}

/// Element declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDecl {
    /// Element name
    pub name: String,
    /// Element type
    pub type_ref: TypeRef,
    /// Occurrence bounds (effective, after group flattening)
    pub occurs: Occurs,
    /// `nillable="true"`
    pub nillable: bool,
    /// Documentation text
    pub doc: Option<String>,
}

/// Entry of a complex type's content model
#[derive(Debug, Clone, PartialEq)]
pub enum Particle {
    /// A local element declaration
    Element(ElementDecl),
    /// A reference to a global element
    ElementRef {
        /// Name of the global element
        name: String,
        /// Occurrence bounds of the reference
        occurs: Occurs,
    },
}

impl Particle {
    /// Occurrence bounds of this particle
    pub fn occurs(&self) -> Occurs {
        match self {
            Particle::Element(decl) => decl.occurs,
            Particle::ElementRef { occurs, .. } => *occurs,
        }
    }

    /// Replace the occurrence bounds
    pub fn set_occurs(&mut self, value: Occurs) {
        match self {
            Particle::Element(decl) => decl.occurs = value,
            Particle::ElementRef { occurs, .. } => *occurs = value,
        }
    }
}

/// Attribute declaration
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDecl {
    /// Attribute name
    pub name: String,
    /// Attribute type (always simple)
    pub type_ref: TypeRef,
    /// `use="required"`
    pub required: bool,
    /// Documentation text
    pub doc: Option<String>,
}

/// Attribute of a complex type
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeUse {
    /// A local attribute declaration
    Decl(AttributeDecl),
    /// A reference to a global attribute
    Ref {
        /// Name of the global attribute
        name: String,
        /// `use="required"` on the reference
        required: bool,
    },
}

/// Complex type definition
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComplexType {
    /// Name for global types
    pub name: Option<String>,
    /// Type extended through `complexContent/extension`
    pub base: Option<TypeRef>,
    /// Value type of `simpleContent`
    pub simple_content: Option<TypeRef>,
    /// Flattened element particles in declaration order
    pub particles: Vec<Particle>,
    /// Attributes in declaration order
    pub attributes: Vec<AttributeUse>,
    /// Documentation text
    pub doc: Option<String>,
}

/// Variety of a simple type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleVariety {
    /// Restriction of a base type
    Restriction(TypeRef),
    /// Whitespace separated list of an item type
    List(TypeRef),
    /// Union of member types
    Union,
}

/// Simple type definition
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleType {
    /// Name for global types
    pub name: Option<String>,
    /// How the type is derived
    pub variety: SimpleVariety,
    /// Documentation text
    pub doc: Option<String>,
}

/// A type definition stored in the arena
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    /// Complex type
    Complex(ComplexType),
    /// Simple type
    Simple(SimpleType),
}

impl TypeDef {
    /// Name of the type, if global
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeDef::Complex(ct) => ct.name.as_deref(),
            TypeDef::Simple(st) => st.name.as_deref(),
        }
    }

    /// Short kind label
    pub fn kind(&self) -> &'static str {
        match self {
            TypeDef::Complex(_) => "complex",
            TypeDef::Simple(_) => "simple",
        }
    }
}

/// Result of resolving a [`TypeRef`]
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'g> {
    /// An XSD built-in
    Builtin(&'g str),
    /// A definition in the arena
    Type(TypeId, &'g TypeDef),
}

/// The parsed schema
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    /// `targetNamespace` of the schema document
    pub target_namespace: Option<String>,
    nodes: Vec<TypeDef>,
    types: IndexMap<String, TypeId>,
    elements: IndexMap<String, ElementDecl>,
    attributes: IndexMap<String, AttributeDecl>,
}

impl SchemaGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a type definition and return its id
    pub fn add_type(&mut self, def: TypeDef) -> TypeId {
        self.nodes.push(def);
        TypeId(self.nodes.len() - 1)
    }

    /// Register a global type name
    pub fn register_type(&mut self, name: &str, id: TypeId) -> Result<()> {
        if self.types.contains_key(name) {
            return Err(Error::invalid_schema(format!("duplicate type name '{}'", name)));
        }
        self.types.insert(name.to_string(), id);
        Ok(())
    }

    /// Register a global element
    pub fn add_element(&mut self, decl: ElementDecl) -> Result<()> {
        if self.elements.contains_key(&decl.name) {
            return Err(Error::invalid_schema(format!(
                "duplicate element name '{}'",
                decl.name
            )));
        }
        self.elements.insert(decl.name.clone(), decl);
        Ok(())
    }

    /// Register a global attribute
    pub fn add_attribute(&mut self, decl: AttributeDecl) -> Result<()> {
        if self.attributes.contains_key(&decl.name) {
            return Err(Error::invalid_schema(format!(
                "duplicate attribute name '{}'",
                decl.name
            )));
        }
        self.attributes.insert(decl.name.clone(), decl);
        Ok(())
    }

    /// Get a type definition by id
    pub fn get(&self, id: TypeId) -> Option<&TypeDef> {
        self.nodes.get(id.0)
    }

    /// Look up a global type by name
    pub fn lookup_type(&self, name: &str) -> Option<TypeId> {
        self.types.get(name).copied()
    }

    /// Look up a global element by name
    pub fn element(&self, name: &str) -> Option<&ElementDecl> {
        self.elements.get(name)
    }

    /// Look up a global attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeDecl> {
        self.attributes.get(name)
    }

    /// Global elements in declaration order
    pub fn elements(&self) -> impl Iterator<Item = &ElementDecl> {
        self.elements.values()
    }

    /// Global types in declaration order
    pub fn types(&self) -> impl Iterator<Item = (&str, &TypeDef)> {
        self.types
            .iter()
            .map(move |(name, id)| (name.as_str(), &self.nodes[id.0]))
    }

    /// Number of global elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of global types
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Number of type definitions, anonymous ones included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Names of every element and attribute declaration, global and local
    pub fn declared_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .elements
            .keys()
            .chain(self.attributes.keys())
            .map(String::as_str)
            .collect();
        for node in &self.nodes {
            if let TypeDef::Complex(ct) = node {
                names.extend(ct.particles.iter().filter_map(|particle| match particle {
                    Particle::Element(decl) => Some(decl.name.as_str()),
                    Particle::ElementRef { .. } => None,
                }));
                names.extend(ct.attributes.iter().filter_map(|attribute| match attribute {
                    AttributeUse::Decl(decl) => Some(decl.name.as_str()),
                    AttributeUse::Ref { .. } => None,
                }));
            }
        }
        names
    }

    /// The element to convert: the named one, or the first declared
    pub fn root_element(&self, name: Option<&str>) -> Result<&ElementDecl> {
        match name {
            Some(name) => self.element(name).ok_or_else(|| {
                Error::invalid_schema(format!("no top-level element named '{}'", name))
            }),
            None => self
                .elements
                .values()
                .next()
                .ok_or_else(|| Error::invalid_schema("schema declares no top-level element")),
        }
    }

    /// Resolve a type reference
    pub fn resolve<'g>(&'g self, type_ref: &'g TypeRef) -> Result<Resolved<'g>> {
        match type_ref {
            TypeRef::Builtin(name) => Ok(Resolved::Builtin(name)),
            TypeRef::Named(name) => {
                let id = self.lookup_type(name).ok_or_else(|| {
                    Error::invalid_schema(format!("unresolved type reference '{}'", name))
                })?;
                Ok(Resolved::Type(id, &self.nodes[id.0]))
            }
            TypeRef::Anonymous(id) => self
                .get(*id)
                .map(|def| Resolved::Type(*id, def))
                .ok_or_else(|| Error::invalid_schema("dangling anonymous type")),
        }
    }

    /// Check that every reference in the graph points at a declaration
    pub fn validate_references(&self) -> Result<()> {
        for decl in self.elements.values() {
            self.check_type_ref(&decl.type_ref)?;
        }
        for decl in self.attributes.values() {
            self.check_type_ref(&decl.type_ref)?;
        }
        for node in &self.nodes {
            match node {
                TypeDef::Complex(ct) => {
                    for type_ref in ct.base.iter().chain(ct.simple_content.iter()) {
                        self.check_type_ref(type_ref)?;
                    }
                    for particle in &ct.particles {
                        match particle {
                            Particle::Element(decl) => self.check_type_ref(&decl.type_ref)?,
                            Particle::ElementRef { name, .. } => {
                                if self.element(name).is_none() {
                                    return Err(Error::invalid_schema(format!(
                                        "unresolved element reference '{}'",
                                        name
                                    )));
                                }
                            }
                        }
                    }
                    for attribute in &ct.attributes {
                        match attribute {
                            AttributeUse::Decl(decl) => self.check_type_ref(&decl.type_ref)?,
                            AttributeUse::Ref { name, .. } => {
                                if self.attribute(name).is_none() {
                                    return Err(Error::invalid_schema(format!(
                                        "unresolved attribute reference '{}'",
                                        name
                                    )));
                                }
                            }
                        }
                    }
                }
                TypeDef::Simple(st) => match &st.variety {
                    SimpleVariety::Restriction(type_ref) | SimpleVariety::List(type_ref) => {
                        self.check_type_ref(type_ref)?
                    }
                    SimpleVariety::Union => {}
                },
            }
        }
        Ok(())
    }

    fn check_type_ref(&self, type_ref: &TypeRef) -> Result<()> {
        self.resolve(type_ref).map(|_| ())
    }
}
