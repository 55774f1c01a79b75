//! Schema graph to Avro mapping
//!
//! [`AvroMapper`] walks the graph from the document root element and builds
//! one [`AvroSchema`] tree. Each complex type becomes a record the first time
//! it is reached; later occurrences, including recursive ones, refer to it by
//! name.
//!
//! Cardinality rules for an element with bounds `(min, max)` and mapped type `T`:
//!
//! | bounds | result |
//! |---|---|
//! | `(1, 1)` | `T` |
//! | `(0, 1)` or nillable | `["null", T]`, default `null` |
//! | `(1, n)` | `{"type": "array", "items": T}` |
//! | `(0, n)` | `["null", {"type": "array", "items": ["null", T]}]`, default `null` |

use super::primitives::{BuiltinMapping, PrimitiveTable};
use super::types::{AvroSchema, Field, LogicalSchema, Record};
use crate::convert::ConvertOptions;
use crate::error::{Error, Result};
use crate::names::{validate_identifier, validate_record_name};
use crate::schema::{
    AttributeUse, ComplexType, ElementDecl, Occurs, Particle, Resolved, SchemaGraph, SimpleType,
    SimpleVariety, TypeDef, TypeId, TypeRef,
};
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};

/// Name of the field carrying the value of a simple-content type
pub const SIMPLE_CONTENT_FIELD: &str = "value";

/// Maps a [`SchemaGraph`] to an [`AvroSchema`]
pub struct AvroMapper<'a> {
    graph: &'a SchemaGraph,
    primitives: &'a PrimitiveTable,
    options: &'a ConvertOptions,
    /// Record names emitted so far, with the type that produced them
    defined: HashMap<String, TypeId>,
    depth: usize,
}

impl<'a> AvroMapper<'a> {
    /// Create a mapper using the shared primitive table
    pub fn new(graph: &'a SchemaGraph, options: &'a ConvertOptions) -> Self {
        Self {
            graph,
            primitives: PrimitiveTable::global(),
            options,
            defined: HashMap::new(),
            depth: 0,
        }
    }

    /// Map the document root element to `["null", <root type>]`
    pub fn map_document(mut self) -> Result<AvroSchema> {
        let namespace = self.options.namespace();
        if let Some(namespace) = namespace {
            for segment in namespace.split('.') {
                validate_identifier(segment)?;
            }
        }
        self.validate_declared_names()?;

        let root = self.graph.root_element(self.options.root_element())?;
        tracing::debug!(root = %root.name, "mapping root element");

        let schema = match self.map_type_ref(&root.type_ref, &root.name)? {
            AvroSchema::Record(mut record) => {
                record.namespace = namespace.map(String::from);
                AvroSchema::Record(record)
            }
            other => other,
        };

        tracing::debug!(records = self.defined.len(), "mapped schema graph");
        Ok(schema.optional())
    }

    /// Reject unrepresentable names anywhere in the schema, reachable or not
    fn validate_declared_names(&self) -> Result<()> {
        for name in self.graph.declared_names() {
            validate_identifier(name)?;
        }
        for (name, def) in self.graph.types() {
            if let TypeDef::Complex(_) = def {
                validate_record_name(name)?;
            }
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        self.options.limits().check_mapping_depth(self.depth)
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Map a type reference; `name_hint` names records built from anonymous types
    pub fn map_type_ref(&mut self, type_ref: &TypeRef, name_hint: &str) -> Result<AvroSchema> {
        self.enter()?;
        let result = match self.graph.resolve(type_ref)? {
            Resolved::Builtin(name) => self.map_builtin(name),
            Resolved::Type(_, TypeDef::Simple(st)) => self.map_simple(st, name_hint),
            Resolved::Type(id, TypeDef::Complex(ct)) => self.map_complex(id, ct, name_hint),
        };
        self.leave();
        result
    }

    fn map_builtin(&self, name: &str) -> Result<AvroSchema> {
        match self.primitives.lookup(name) {
            Some(BuiltinMapping::Primitive(primitive)) => Ok(AvroSchema::Primitive(primitive)),
            Some(BuiltinMapping::Logical(logical)) => Ok(AvroSchema::Logical(LogicalSchema {
                logical,
                connect_metadata: self.options.connect_metadata(),
            })),
            None => Err(Error::unsupported(name)),
        }
    }

    /// Map a reference that must denote a simple type
    fn map_simple_ref(&mut self, type_ref: &TypeRef, name_hint: &str) -> Result<AvroSchema> {
        if let Resolved::Type(_, TypeDef::Complex(_)) = self.graph.resolve(type_ref)? {
            return Err(Error::invalid_schema(format!(
                "'{}' requires a simple type but references a complex type",
                name_hint
            )));
        }
        self.map_type_ref(type_ref, name_hint)
    }

    fn map_simple(&mut self, st: &SimpleType, name_hint: &str) -> Result<AvroSchema> {
        match &st.variety {
            SimpleVariety::Restriction(base) => self.map_simple_ref(base, name_hint),
            SimpleVariety::List(item) => Ok(AvroSchema::array(self.map_simple_ref(item, name_hint)?)),
            SimpleVariety::Union => Err(Error::unsupported(format!(
                "union simple type {}",
                st.name.as_deref().unwrap_or(name_hint)
            ))),
        }
    }

    fn map_complex(&mut self, id: TypeId, ct: &ComplexType, name_hint: &str) -> Result<AvroSchema> {
        let name = ct.name.as_deref().unwrap_or(name_hint);

        match self.defined.get(name) {
            Some(existing) if *existing == id => return Ok(AvroSchema::Named(name.to_string())),
            Some(_) => {
                return Err(Error::invalid_schema(format!(
                    "record name '{}' is produced by more than one complex type",
                    name
                )))
            }
            None => {}
        }

        validate_record_name(name)?;
        // Registered before the fields so recursive references become names
        self.defined.insert(name.to_string(), id);

        let mut fields = Vec::new();
        self.collect_fields(ct, &mut fields)?;

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate field '{}' in record '{}'",
                    field.name, name
                )));
            }
        }

        Ok(AvroSchema::Record(Record {
            name: name.to_string(),
            namespace: None,
            doc: self.doc(ct.doc.as_deref()),
            fields,
            connect_name: self.connect_name(name),
        }))
    }

    /// Fields of a complex type: inherited ones first, then its own
    fn collect_fields(&mut self, ct: &ComplexType, fields: &mut Vec<Field>) -> Result<()> {
        if let Some(base) = &ct.base {
            match self.graph.resolve(base)? {
                Resolved::Type(_, TypeDef::Complex(base_ct)) => {
                    self.enter()?;
                    self.collect_fields(base_ct, fields)?;
                    self.leave();
                }
                _ => {
                    return Err(Error::invalid_schema(
                        "complexContent extension of a simple type",
                    ))
                }
            }
        }

        if let Some(content) = &ct.simple_content {
            match self.graph.resolve(content)? {
                // Extending a type that already has simple content inherits its fields
                Resolved::Type(_, TypeDef::Complex(base_ct)) => {
                    self.enter()?;
                    self.collect_fields(base_ct, fields)?;
                    self.leave();
                }
                _ => {
                    let value = self.map_type_ref(content, SIMPLE_CONTENT_FIELD)?;
                    fields.push(Field::new(SIMPLE_CONTENT_FIELD, value));
                }
            }
        }

        for particle in &ct.particles {
            fields.push(self.map_particle(particle)?);
        }

        for attribute in &ct.attributes {
            fields.push(self.map_attribute(attribute)?);
        }

        Ok(())
    }

    fn map_particle(&mut self, particle: &Particle) -> Result<Field> {
        match particle {
            Particle::Element(decl) => self.map_element(decl, decl.occurs),
            Particle::ElementRef { name, occurs } => {
                let graph = self.graph;
                let decl = graph.element(name).ok_or_else(|| {
                    Error::invalid_schema(format!("unresolved element reference '{}'", name))
                })?;
                self.map_element(decl, *occurs)
            }
        }
    }

    /// Map an element declaration to a record field, applying its cardinality
    pub fn map_element(&mut self, decl: &ElementDecl, occurs: Occurs) -> Result<Field> {
        validate_identifier(&decl.name)?;

        let item = self.map_type_ref(&decl.type_ref, &decl.name)?;
        let nullable = occurs.is_emptiable() || decl.nillable;

        let field = if occurs.is_multiple() {
            let item = if nullable { item.optional() } else { item };
            let array = AvroSchema::array(item);
            if occurs.is_emptiable() {
                Field::new(&decl.name, array.optional()).with_default(JsonValue::Null)
            } else {
                Field::new(&decl.name, array)
            }
        } else if nullable {
            Field::new(&decl.name, item.optional()).with_default(JsonValue::Null)
        } else {
            Field::new(&decl.name, item)
        };

        Ok(field.with_doc(self.doc(decl.doc.as_deref())))
    }

    fn map_attribute(&mut self, attribute: &AttributeUse) -> Result<Field> {
        let graph = self.graph;
        let (decl, required) = match attribute {
            AttributeUse::Decl(decl) => (decl, decl.required),
            AttributeUse::Ref { name, required } => {
                let decl = graph.attribute(name).ok_or_else(|| {
                    Error::invalid_schema(format!("unresolved attribute reference '{}'", name))
                })?;
                (decl, *required)
            }
        };

        validate_identifier(&decl.name)?;
        let schema = self.map_simple_ref(&decl.type_ref, &decl.name)?;

        let field = if required {
            Field::new(&decl.name, schema)
        } else {
            Field::new(&decl.name, schema.optional()).with_default(JsonValue::Null)
        };
        Ok(field.with_doc(self.doc(decl.doc.as_deref())))
    }

    fn connect_name(&self, name: &str) -> Option<String> {
        if !self.options.connect_metadata() {
            return None;
        }
        Some(match self.options.namespace() {
            Some(namespace) => format!("{}.{}", namespace, name),
            None => name.to_string(),
        })
    }

    fn doc(&self, doc: Option<&str>) -> Option<String> {
        if self.options.include_docs() {
            doc.map(String::from)
        } else {
            None
        }
    }
}
