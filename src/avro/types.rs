//! Avro schema tree
//!
//! A closed set of schema node kinds produced by the mapper and consumed by
//! the serializer. Serialization emits keys in the order Avro tooling and the
//! Kafka Connect converter write them.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;

/// Avro primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// UTF-8 string
    String,
    /// Boolean
    Boolean,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// Single precision float
    Float,
    /// Double precision float
    Double,
    /// Byte sequence
    Bytes,
}

impl Primitive {
    /// Avro type name
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Bytes => "bytes",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Avro logical types used for XSD temporal types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    /// Days since the epoch, over `int`
    Date,
    /// Milliseconds after midnight, over `int`
    TimeMillis,
    /// Milliseconds since the epoch, over `long`
    TimestampMillis,
}

impl LogicalType {
    /// The primitive carrying the value
    pub fn underlying(&self) -> Primitive {
        match self {
            LogicalType::Date | LogicalType::TimeMillis => Primitive::Int,
            LogicalType::TimestampMillis => Primitive::Long,
        }
    }

    /// Value of the `logicalType` property
    pub fn name(&self) -> &'static str {
        match self {
            LogicalType::Date => "date",
            LogicalType::TimeMillis => "time-millis",
            LogicalType::TimestampMillis => "timestamp-millis",
        }
    }

    /// Kafka Connect type name for this logical type
    pub fn connect_name(&self) -> &'static str {
        match self {
            LogicalType::Date => "org.apache.kafka.connect.data.Date",
            LogicalType::TimeMillis => "org.apache.kafka.connect.data.Time",
            LogicalType::TimestampMillis => "org.apache.kafka.connect.data.Timestamp",
        }
    }
}

/// A logical type annotation on its underlying primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalSchema {
    /// The logical type
    pub logical: LogicalType,
    /// Whether to emit `connect.version` / `connect.name`
    pub connect_metadata: bool,
}

/// A record field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field type
    pub schema: AvroSchema,
    /// Documentation
    pub doc: Option<String>,
    /// Default value
    pub default: Option<JsonValue>,
}

impl Field {
    /// Create a required field without documentation
    pub fn new(name: impl Into<String>, schema: AvroSchema) -> Self {
        Self {
            name: name.into(),
            schema,
            doc: None,
            default: None,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, default: JsonValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the documentation
    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }
}

/// A named record
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Record name
    pub name: String,
    /// Namespace, only set where it differs from the enclosing one
    pub namespace: Option<String>,
    /// Documentation
    pub doc: Option<String>,
    /// Fields in declaration order
    pub fields: Vec<Field>,
    /// Kafka Connect fully qualified name
    pub connect_name: Option<String>,
}

impl Record {
    /// Create an empty record
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            doc: None,
            fields: Vec::new(),
            connect_name: None,
        }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Avro schema node
#[derive(Debug, Clone, PartialEq)]
pub enum AvroSchema {
    /// `"null"`
    Null,
    /// A primitive type
    Primitive(Primitive),
    /// A logical type
    Logical(LogicalSchema),
    /// A record definition
    Record(Record),
    /// An array of items
    Array(Box<AvroSchema>),
    /// A union of member types
    Union(Vec<AvroSchema>),
    /// Reference to a record defined earlier in the same document
    Named(String),
}

impl AvroSchema {
    /// Create an array schema
    pub fn array(items: AvroSchema) -> Self {
        AvroSchema::Array(Box::new(items))
    }

    /// Check whether `null` is an accepted value
    pub fn is_nullable(&self) -> bool {
        match self {
            AvroSchema::Null => true,
            AvroSchema::Union(members) => members.iter().any(|m| matches!(m, AvroSchema::Null)),
            _ => false,
        }
    }

    /// Wrap into `["null", self]` unless already nullable
    pub fn optional(self) -> Self {
        if self.is_nullable() {
            self
        } else {
            AvroSchema::Union(vec![AvroSchema::Null, self])
        }
    }

    /// The record, if this node is one
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            AvroSchema::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The non-null member of an optional union, or the node itself
    pub fn non_null(&self) -> &AvroSchema {
        match self {
            AvroSchema::Union(members) if members.len() == 2 && members[0] == AvroSchema::Null => {
                &members[1]
            }
            other => other,
        }
    }
}

impl Serialize for AvroSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AvroSchema::Null => serializer.serialize_str("null"),
            AvroSchema::Primitive(primitive) => serializer.serialize_str(primitive.name()),
            AvroSchema::Named(name) => serializer.serialize_str(name),
            AvroSchema::Union(members) => members.serialize(serializer),
            AvroSchema::Logical(logical) => logical.serialize(serializer),
            AvroSchema::Record(record) => record.serialize(serializer),
            AvroSchema::Array(items) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", items)?;
                map.end()
            }
        }
    }
}

impl Serialize for LogicalSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.logical.underlying().name())?;
        if self.connect_metadata {
            map.serialize_entry("connect.version", &1)?;
            map.serialize_entry("connect.name", self.logical.connect_name())?;
        }
        map.serialize_entry("logicalType", self.logical.name())?;
        map.end()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "record")?;
        map.serialize_entry("name", &self.name)?;
        if let Some(namespace) = &self.namespace {
            map.serialize_entry("namespace", namespace)?;
        }
        if let Some(doc) = &self.doc {
            map.serialize_entry("doc", doc)?;
        }
        map.serialize_entry("fields", &self.fields)?;
        if let Some(connect_name) = &self.connect_name {
            map.serialize_entry("connect.name", connect_name)?;
        }
        map.end()
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.schema)?;
        if let Some(doc) = &self.doc {
            map.serialize_entry("doc", doc)?;
        }
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_is_idempotent() {
        let schema = AvroSchema::Primitive(Primitive::Float).optional();
        assert_eq!(
            schema,
            AvroSchema::Union(vec![AvroSchema::Null, AvroSchema::Primitive(Primitive::Float)])
        );
        assert_eq!(schema.clone().optional(), schema);
        assert_eq!(schema.non_null(), &AvroSchema::Primitive(Primitive::Float));
    }

    #[test]
    fn test_serialize_logical() {
        let date = AvroSchema::Logical(LogicalSchema {
            logical: LogicalType::Date,
            connect_metadata: true,
        });
        assert_eq!(
            serde_json::to_string(&date).unwrap(),
            r#"{"type":"int","connect.version":1,"connect.name":"org.apache.kafka.connect.data.Date","logicalType":"date"}"#
        );

        let timestamp = AvroSchema::Logical(LogicalSchema {
            logical: LogicalType::TimestampMillis,
            connect_metadata: false,
        });
        assert_eq!(
            serde_json::to_string(&timestamp).unwrap(),
            r#"{"type":"long","logicalType":"timestamp-millis"}"#
        );
    }

    #[test]
    fn test_serialize_record_key_order() {
        let mut record = Record::new("Person");
        record.namespace = Some("com.example".to_string());
        record.fields.push(
            Field::new("age", AvroSchema::Primitive(Primitive::Int).optional())
                .with_default(JsonValue::Null),
        );
        record.connect_name = Some("com.example.Person".to_string());

        assert_eq!(
            serde_json::to_string(&AvroSchema::Record(record)).unwrap(),
            r#"{"type":"record","name":"Person","namespace":"com.example","fields":[{"name":"age","type":["null","int"],"default":null}],"connect.name":"com.example.Person"}"#
        );
    }

    #[test]
    fn test_serialize_array_and_named() {
        let schema = AvroSchema::array(AvroSchema::Named("Node".to_string()));
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "array", "items": "Node"})
        );
    }
}
