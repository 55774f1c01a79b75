//! XSD Document Parsing
//!
//! This module interprets an XML document tree as an XSD schema and builds a
//! [`SchemaGraph`]. Structural problems are [`Error::InvalidSchema`];
//! constructs outside the supported subset are [`Error::UnsupportedType`].

use super::graph::{
    AttributeDecl, AttributeUse, ComplexType, ElementDecl, Particle, SchemaGraph, SimpleType,
    SimpleVariety, TypeDef, TypeRef,
};
use super::particles::Occurs;

use crate::documents::{Document, Element};
use crate::error::{Error, Result};
use crate::XSD_NAMESPACE;

/// XSD element local names
mod xsd_elements {
    pub const SCHEMA: &str = "schema";
    pub const ELEMENT: &str = "element";
    pub const COMPLEX_TYPE: &str = "complexType";
    pub const SIMPLE_TYPE: &str = "simpleType";
    pub const ATTRIBUTE: &str = "attribute";
    pub const ATTRIBUTE_GROUP: &str = "attributeGroup";
    pub const GROUP: &str = "group";
    pub const SEQUENCE: &str = "sequence";
    pub const CHOICE: &str = "choice";
    pub const ALL: &str = "all";
    pub const ANNOTATION: &str = "annotation";
    pub const DOCUMENTATION: &str = "documentation";
    pub const IMPORT: &str = "import";
    pub const INCLUDE: &str = "include";
    pub const NOTATION: &str = "notation";
    pub const RESTRICTION: &str = "restriction";
    pub const EXTENSION: &str = "extension";
    pub const LIST: &str = "list";
    pub const UNION: &str = "union";
    pub const COMPLEX_CONTENT: &str = "complexContent";
    pub const SIMPLE_CONTENT: &str = "simpleContent";
    pub const ANY: &str = "any";
    pub const ANY_ATTRIBUTE: &str = "anyAttribute";
}

/// XSD attribute names
mod xsd_attrs {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const REF: &str = "ref";
    pub const BASE: &str = "base";
    pub const ITEM_TYPE: &str = "itemType";
    pub const TARGET_NAMESPACE: &str = "targetNamespace";
    pub const NILLABLE: &str = "nillable";
    pub const MIN_OCCURS: &str = "minOccurs";
    pub const MAX_OCCURS: &str = "maxOccurs";
    pub const USE: &str = "use";
}

use xsd_attrs as attrs;
use xsd_elements as xs;

/// Type assumed for declarations that name no type at all
const DEFAULT_SIMPLE_TYPE: &str = "string";

impl SchemaGraph {
    /// Parse an XSD schema from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        let doc = Document::from_string(xml)?;
        Self::from_document(&doc)
    }

    /// Parse an XSD schema from bytes
    pub fn from_bytes(xml: &[u8]) -> Result<Self> {
        let doc = Document::parse(xml)?;
        Self::from_document(&doc)
    }

    /// Build the schema graph from a parsed document
    pub fn from_document(doc: &Document) -> Result<Self> {
        let root = doc.root();
        if !root.is(XSD_NAMESPACE, xs::SCHEMA) {
            return Err(Error::invalid_schema(format!(
                "root element {} is not an XML schema",
                root.qname
            )));
        }

        let mut builder = SchemaBuilder {
            graph: SchemaGraph::new(),
        };
        builder.graph.target_namespace = root.get_attribute(attrs::TARGET_NAMESPACE).map(String::from);

        for child in &root.children {
            builder.parse_global(child)?;
        }

        let graph = builder.graph;
        graph.root_element(None)?;
        graph.validate_references()?;

        tracing::debug!(
            elements = graph.element_count(),
            types = graph.type_count(),
            nodes = graph.node_count(),
            "built schema graph"
        );
        Ok(graph)
    }
}

struct SchemaBuilder {
    graph: SchemaGraph,
}

impl SchemaBuilder {
    /// Handle one child of `xs:schema`
    fn parse_global(&mut self, el: &Element) -> Result<()> {
        if !el.qname.is_in(XSD_NAMESPACE) {
            return Err(unexpected(el, xs::SCHEMA));
        }

        match el.local_name() {
            xs::ELEMENT => {
                let decl = self.parse_element_decl(el, Occurs::once())?;
                self.graph.add_element(decl)?;
            }
            xs::COMPLEX_TYPE => {
                let name = required_name(el)?;
                let ct = self.parse_complex_type(el, Some(name.clone()))?;
                let id = self.graph.add_type(TypeDef::Complex(ct));
                self.graph.register_type(&name, id)?;
            }
            xs::SIMPLE_TYPE => {
                let name = required_name(el)?;
                let st = self.parse_simple_type(el, Some(name.clone()))?;
                let id = self.graph.add_type(TypeDef::Simple(st));
                self.graph.register_type(&name, id)?;
            }
            xs::ATTRIBUTE => {
                let decl = self.parse_attribute_decl(el, false)?;
                self.graph.add_attribute(decl)?;
            }
            // Unused definitions and external references do not affect the result
            xs::ANNOTATION | xs::IMPORT | xs::INCLUDE | xs::NOTATION | xs::GROUP
            | xs::ATTRIBUTE_GROUP => {}
            _ => return Err(unexpected(el, xs::SCHEMA)),
        }
        Ok(())
    }

    /// Parse an `xs:element` that declares (rather than references) an element
    fn parse_element_decl(&mut self, el: &Element, occurs: Occurs) -> Result<ElementDecl> {
        let name = required_name(el)?;
        let type_ref = self.parse_type_of(el, &name, true)?;
        let nillable = match el.get_attribute(attrs::NILLABLE) {
            None => false,
            Some(value) => parse_bool(value)?,
        };

        Ok(ElementDecl {
            name,
            type_ref,
            occurs,
            nillable,
            doc: documentation(el),
        })
    }

    /// Parse an `xs:element` inside a model group
    fn parse_element_particle(&mut self, el: &Element) -> Result<Particle> {
        let occurs = Occurs::parse(
            el.get_attribute(attrs::MIN_OCCURS),
            el.get_attribute(attrs::MAX_OCCURS),
        )?;

        match el.get_attribute(attrs::REF) {
            Some(reference) => Ok(Particle::ElementRef {
                name: resolve_local(el, reference)?,
                occurs,
            }),
            None => Ok(Particle::Element(self.parse_element_decl(el, occurs)?)),
        }
    }

    /// Type of an element or attribute: `type` attribute or inline definition
    fn parse_type_of(&mut self, el: &Element, owner: &str, allow_complex: bool) -> Result<TypeRef> {
        let mut inline = None;
        for child in el.children_in(XSD_NAMESPACE) {
            match child.local_name() {
                xs::ANNOTATION => {}
                xs::SIMPLE_TYPE => inline = Some(self.parse_simple_type(child, None).map(TypeDef::Simple)?),
                xs::COMPLEX_TYPE if allow_complex => {
                    inline = Some(self.parse_complex_type(child, None).map(TypeDef::Complex)?)
                }
                // Identity constraints and type alternatives carry no structure
                "key" | "keyref" | "unique" | "alternative" if allow_complex => {}
                _ => return Err(unexpected(child, el.local_name())),
            }
        }

        match (el.get_attribute(attrs::TYPE), inline) {
            (Some(_), Some(_)) => Err(Error::invalid_schema(format!(
                "'{}' has both a type attribute and an inline type",
                owner
            ))),
            (Some(type_name), None) => resolve_type_ref(el, type_name),
            (None, Some(def)) => Ok(TypeRef::Anonymous(self.graph.add_type(def))),
            (None, None) => Ok(TypeRef::Builtin(DEFAULT_SIMPLE_TYPE.to_string())),
        }
    }

    fn parse_complex_type(&mut self, el: &Element, name: Option<String>) -> Result<ComplexType> {
        let mut ct = ComplexType {
            name,
            doc: documentation(el),
            ..Default::default()
        };

        for child in el.children_in(XSD_NAMESPACE) {
            match child.local_name() {
                xs::COMPLEX_CONTENT => self.parse_complex_content(child, &mut ct)?,
                xs::SIMPLE_CONTENT => self.parse_simple_content(child, &mut ct)?,
                _ => self.parse_content_item(child, xs::COMPLEX_TYPE, &mut ct)?,
            }
        }
        Ok(ct)
    }

    /// A model group, attribute or annotation inside a complex type body
    fn parse_content_item(&mut self, el: &Element, parent: &str, ct: &mut ComplexType) -> Result<()> {
        match el.local_name() {
            xs::ANNOTATION => {}
            xs::SEQUENCE | xs::CHOICE | xs::ALL => {
                if !ct.particles.is_empty() {
                    return Err(Error::invalid_schema(format!(
                        "<{}> declares more than one content model",
                        parent
                    )));
                }
                self.parse_group(el, Occurs::once(), &mut ct.particles)?;
            }
            xs::ATTRIBUTE => {
                if let Some(attribute) = self.parse_attribute_use(el)? {
                    ct.attributes.push(attribute);
                }
            }
            xs::GROUP | xs::ATTRIBUTE_GROUP | xs::ANY_ATTRIBUTE => {
                return Err(Error::unsupported(el.local_name()))
            }
            _ => return Err(unexpected(el, parent)),
        }
        Ok(())
    }

    /// Flatten a model group into `out`, folding the group's bounds into each particle
    fn parse_group(&mut self, el: &Element, outer: Occurs, out: &mut Vec<Particle>) -> Result<()> {
        let occurs = Occurs::parse(
            el.get_attribute(attrs::MIN_OCCURS),
            el.get_attribute(attrs::MAX_OCCURS),
        )?
        .within(outer);
        // Every alternative of a choice may be absent
        let member_outer = if el.local_name() == xs::CHOICE {
            occurs.emptiable()
        } else {
            occurs
        };

        for child in el.children_in(XSD_NAMESPACE) {
            match child.local_name() {
                xs::ANNOTATION => {}
                xs::ELEMENT => {
                    let mut particle = self.parse_element_particle(child)?;
                    let effective = particle.occurs().within(member_outer);
                    if effective.is_empty() {
                        continue;
                    }
                    particle.set_occurs(effective);
                    out.push(particle);
                }
                xs::SEQUENCE | xs::CHOICE => self.parse_group(child, member_outer, out)?,
                xs::ANY | xs::GROUP => return Err(Error::unsupported(child.local_name())),
                _ => return Err(unexpected(child, el.local_name())),
            }
        }
        Ok(())
    }

    fn parse_complex_content(&mut self, el: &Element, ct: &mut ComplexType) -> Result<()> {
        for child in el.children_in(XSD_NAMESPACE) {
            match child.local_name() {
                xs::ANNOTATION => {}
                xs::EXTENSION => {
                    let base = required_base(child)?;
                    if base != TypeRef::Builtin("anyType".to_string()) {
                        ct.base = Some(base);
                    }
                    self.parse_derivation_body(child, ct)?;
                }
                // A restriction restates the content it keeps
                xs::RESTRICTION => {
                    required_base(child)?;
                    self.parse_derivation_body(child, ct)?;
                }
                _ => return Err(unexpected(child, xs::COMPLEX_CONTENT)),
            }
        }
        Ok(())
    }

    fn parse_simple_content(&mut self, el: &Element, ct: &mut ComplexType) -> Result<()> {
        for child in el.children_in(XSD_NAMESPACE) {
            match child.local_name() {
                xs::ANNOTATION => {}
                xs::EXTENSION | xs::RESTRICTION => {
                    ct.simple_content = Some(required_base(child)?);
                    for item in child.children_in(XSD_NAMESPACE) {
                        match item.local_name() {
                            xs::ATTRIBUTE | xs::ATTRIBUTE_GROUP | xs::ANY_ATTRIBUTE | xs::ANNOTATION => {
                                self.parse_content_item(item, child.local_name(), ct)?
                            }
                            // Facets narrow the value space but not the type
                            _ => {}
                        }
                    }
                }
                _ => return Err(unexpected(child, xs::SIMPLE_CONTENT)),
            }
        }
        Ok(())
    }

    fn parse_derivation_body(&mut self, el: &Element, ct: &mut ComplexType) -> Result<()> {
        for child in el.children_in(XSD_NAMESPACE) {
            self.parse_content_item(child, el.local_name(), ct)?;
        }
        Ok(())
    }

    fn parse_simple_type(&mut self, el: &Element, name: Option<String>) -> Result<SimpleType> {
        let mut variety = None;

        for child in el.children_in(XSD_NAMESPACE) {
            let parsed = match child.local_name() {
                xs::ANNOTATION => continue,
                xs::RESTRICTION => {
                    SimpleVariety::Restriction(self.parse_simple_ref(child, attrs::BASE)?)
                }
                xs::LIST => SimpleVariety::List(self.parse_simple_ref(child, attrs::ITEM_TYPE)?),
                xs::UNION => SimpleVariety::Union,
                _ => return Err(unexpected(child, xs::SIMPLE_TYPE)),
            };
            if variety.replace(parsed).is_some() {
                return Err(Error::invalid_schema("simpleType declares more than one derivation"));
            }
        }

        let variety = variety.ok_or_else(|| {
            Error::invalid_schema("simpleType without restriction, list or union")
        })?;

        Ok(SimpleType {
            name,
            variety,
            doc: documentation(el),
        })
    }

    /// Base or item type of a simple type: named by attribute or given inline
    fn parse_simple_ref(&mut self, el: &Element, attribute: &str) -> Result<TypeRef> {
        if let Some(type_name) = el.get_attribute(attribute) {
            return resolve_type_ref(el, type_name);
        }

        let inline = el
            .children_in(XSD_NAMESPACE)
            .find(|c| c.local_name() == xs::SIMPLE_TYPE)
            .ok_or_else(|| {
                Error::invalid_schema(format!("<{}> names no {}", el.local_name(), attribute))
            })?;
        let st = self.parse_simple_type(inline, None)?;
        Ok(TypeRef::Anonymous(self.graph.add_type(TypeDef::Simple(st))))
    }

    /// Parse an attribute inside a complex type; prohibited attributes yield `None`
    fn parse_attribute_use(&mut self, el: &Element) -> Result<Option<AttributeUse>> {
        let required = match el.get_attribute(attrs::USE) {
            None | Some("optional") => false,
            Some("required") => true,
            Some("prohibited") => return Ok(None),
            Some(other) => {
                return Err(Error::invalid_schema(format!("invalid attribute use '{}'", other)))
            }
        };

        if let Some(reference) = el.get_attribute(attrs::REF) {
            return Ok(Some(AttributeUse::Ref {
                name: resolve_local(el, reference)?,
                required,
            }));
        }

        Ok(Some(AttributeUse::Decl(self.parse_attribute_decl(el, required)?)))
    }

    fn parse_attribute_decl(&mut self, el: &Element, required: bool) -> Result<AttributeDecl> {
        let name = required_name(el)?;
        let type_ref = self.parse_type_of(el, &name, false)?;
        Ok(AttributeDecl {
            name,
            type_ref,
            required,
            doc: documentation(el),
        })
    }
}

/// Resolve a `type`/`base` attribute value to a reference
fn resolve_type_ref(el: &Element, value: &str) -> Result<TypeRef> {
    let qname = el.namespaces.resolve(value.trim()).ok_or_else(|| {
        Error::invalid_schema(format!("unbound namespace prefix in type reference '{}'", value))
    })?;

    if qname.is_in(XSD_NAMESPACE) {
        Ok(TypeRef::Builtin(qname.local_name))
    } else {
        Ok(TypeRef::Named(qname.local_name))
    }
}

/// Local part of a `ref` attribute, after checking its prefix is bound
fn resolve_local(el: &Element, value: &str) -> Result<String> {
    el.namespaces
        .resolve(value.trim())
        .map(|qname| qname.local_name)
        .ok_or_else(|| {
            Error::invalid_schema(format!("unbound namespace prefix in reference '{}'", value))
        })
}

fn required_name(el: &Element) -> Result<String> {
    el.get_attribute(attrs::NAME)
        .map(|name| name.trim().to_string())
        .ok_or_else(|| Error::invalid_schema(format!("<{}> without a name", el.local_name())))
}

fn required_base(el: &Element) -> Result<TypeRef> {
    let base = el
        .get_attribute(attrs::BASE)
        .ok_or_else(|| Error::invalid_schema(format!("<{}> without a base", el.local_name())))?;
    resolve_type_ref(el, base)
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::invalid_schema(format!("invalid boolean '{}'", other))),
    }
}

/// Text of the `xs:annotation/xs:documentation` children, if any
fn documentation(el: &Element) -> Option<String> {
    let parts: Vec<&str> = el
        .children_in(XSD_NAMESPACE)
        .filter(|c| c.local_name() == xs::ANNOTATION)
        .flat_map(|annotation| annotation.children_in(XSD_NAMESPACE))
        .filter(|c| c.local_name() == xs::DOCUMENTATION)
        .filter_map(|doc| doc.text.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

fn unexpected(el: &Element, parent: &str) -> Error {
    Error::invalid_schema(format!("unexpected {} in <{}>", el.qname, parent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::graph::Resolved;
    use crate::schema::particles::MaxOccurs;

    const BOOKS: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="books" type="BooksForm"/>
  <xs:complexType name="BooksForm">
    <xs:sequence>
      <xs:element name="book" type="BookForm" minOccurs="0" maxOccurs="unbounded"/>
    </xs:sequence>
  </xs:complexType>
  <xs:complexType name="BookForm">
    <xs:sequence>
      <xs:element name="author" type="xs:string"/>
      <xs:element name="price" type="xs:float" minOccurs="0"/>
    </xs:sequence>
    <xs:attribute name="id" type="xs:string"/>
  </xs:complexType>
</xs:schema>"#;

    fn complex<'g>(graph: &'g SchemaGraph, name: &str) -> &'g ComplexType {
        let id = graph.lookup_type(name).unwrap();
        match graph.get(id).unwrap() {
            TypeDef::Complex(ct) => ct,
            other => panic!("expected complex type, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_books_schema() {
        let graph = SchemaGraph::from_string(BOOKS).unwrap();

        assert_eq!(graph.element_count(), 1);
        assert_eq!(graph.type_count(), 2);

        let root = graph.root_element(None).unwrap();
        assert_eq!(root.name, "books");
        assert_eq!(root.type_ref, TypeRef::Named("BooksForm".to_string()));

        let books = complex(&graph, "BooksForm");
        assert_eq!(books.particles.len(), 1);
        assert_eq!(books.particles[0].occurs(), Occurs::zero_or_more());

        let book = complex(&graph, "BookForm");
        assert_eq!(book.particles.len(), 2);
        assert_eq!(book.attributes.len(), 1);
        match &book.particles[0] {
            Particle::Element(decl) => {
                assert_eq!(decl.name, "author");
                assert_eq!(decl.type_ref, TypeRef::Builtin("string".to_string()));
            }
            other => panic!("unexpected particle {:?}", other),
        }
    }

    #[test]
    fn test_forward_reference_resolves() {
        // BooksForm references BookForm before it is declared
        let graph = SchemaGraph::from_string(BOOKS).unwrap();
        let book = complex(&graph, "BooksForm");
        match &book.particles[0] {
            Particle::Element(decl) => assert!(matches!(
                graph.resolve(&decl.type_ref).unwrap(),
                Resolved::Type(_, TypeDef::Complex(_))
            )),
            other => panic!("unexpected particle {:?}", other),
        }
    }

    #[test]
    fn test_wrong_root_is_invalid_schema() {
        let err = SchemaGraph::from_string("<books><book/></books>").unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));

        // Right local name, wrong namespace
        let err = SchemaGraph::from_string("<schema><element name='a'/></schema>").unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn test_dangling_type_is_invalid_schema() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:element name="a" type="Missing"/>
        </xs:schema>"#;
        let err = SchemaGraph::from_string(xsd).unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn test_no_top_level_element_is_invalid_schema() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:complexType name="T"/>
        </xs:schema>"#;
        let err = SchemaGraph::from_string(xsd).unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn test_duplicate_type_is_invalid_schema() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:element name="a" type="T"/>
            <xs:complexType name="T"/>
            <xs:simpleType name="T"><xs:restriction base="xs:string"/></xs:simpleType>
        </xs:schema>"#;
        let err = SchemaGraph::from_string(xsd).unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn test_choice_members_become_optional() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:element name="contact">
              <xs:complexType>
                <xs:sequence>
                  <xs:choice>
                    <xs:element name="email" type="xs:string"/>
                    <xs:element name="phone" type="xs:string" maxOccurs="3"/>
                  </xs:choice>
                  <xs:sequence minOccurs="0" maxOccurs="unbounded">
                    <xs:element name="note" type="xs:string"/>
                  </xs:sequence>
                </xs:sequence>
              </xs:complexType>
            </xs:element>
        </xs:schema>"#;
        let graph = SchemaGraph::from_string(xsd).unwrap();
        let root = graph.root_element(None).unwrap();
        let ct = match graph.resolve(&root.type_ref).unwrap() {
            Resolved::Type(_, TypeDef::Complex(ct)) => ct,
            other => panic!("unexpected {:?}", other),
        };

        let occurs: Vec<_> = ct.particles.iter().map(Particle::occurs).collect();
        assert_eq!(
            occurs,
            vec![
                Occurs::optional(),
                Occurs::new(0, MaxOccurs::Bounded(3)),
                Occurs::zero_or_more(),
            ]
        );
    }

    #[test]
    fn test_default_xsd_namespace_builtins() {
        let xsd = r#"<schema xmlns="http://www.w3.org/2001/XMLSchema">
            <element name="title" type="string"/>
        </schema>"#;
        let graph = SchemaGraph::from_string(xsd).unwrap();
        assert_eq!(
            graph.root_element(None).unwrap().type_ref,
            TypeRef::Builtin("string".to_string())
        );
    }

    #[test]
    fn test_unsupported_constructs() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:element name="a">
              <xs:complexType><xs:sequence><xs:any/></xs:sequence></xs:complexType>
            </xs:element>
        </xs:schema>"#;
        let err = SchemaGraph::from_string(xsd).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(ref c) if c == "any"));
    }

    #[test]
    fn test_documentation_and_nillable() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:element name="a" type="xs:string" nillable="true">
              <xs:annotation><xs:documentation> The a element </xs:documentation></xs:annotation>
            </xs:element>
        </xs:schema>"#;
        let graph = SchemaGraph::from_string(xsd).unwrap();
        let root = graph.root_element(None).unwrap();
        assert!(root.nillable);
        assert_eq!(root.doc.as_deref(), Some("The a element"));
    }

    #[test]
    fn test_prohibited_attribute_dropped() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:element name="a">
              <xs:complexType>
                <xs:attribute name="x" type="xs:string" use="prohibited"/>
                <xs:attribute name="y" type="xs:int" use="required"/>
              </xs:complexType>
            </xs:element>
        </xs:schema>"#;
        let graph = SchemaGraph::from_string(xsd).unwrap();
        let root = graph.root_element(None).unwrap();
        let ct = match graph.resolve(&root.type_ref).unwrap() {
            Resolved::Type(_, TypeDef::Complex(ct)) => ct,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(ct.attributes.len(), 1);
        assert!(matches!(&ct.attributes[0], AttributeUse::Decl(d) if d.name == "y" && d.required));
    }
}
