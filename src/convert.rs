//! Conversion pipeline
//!
//! [`Converter`] runs the four stages in order: XML parsing, schema graph
//! construction, Avro mapping and JSON rendering. Each call is independent;
//! a converter holds only its options and can be shared between threads.

use crate::avro::{format, AvroMapper, AvroSchema};
use crate::documents::Document;
use crate::error::Result;
use crate::limits::Limits;
use crate::schema::SchemaGraph;

/// Namespace given to the root record unless configured otherwise
pub const DEFAULT_NAMESPACE: &str = "de.deepshore.kafka";

/// Options controlling a conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pretty: bool,
    namespace: Option<String>,
    root_element: Option<String>,
    connect_metadata: bool,
    include_docs: bool,
    limits: Limits,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            namespace: Some(DEFAULT_NAMESPACE.to_string()),
            root_element: None,
            connect_metadata: true,
            include_docs: false,
            limits: Limits::default(),
        }
    }
}

impl ConvertOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Render pretty instead of compact JSON
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set the namespace of the root record
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Emit the root record without a namespace
    pub fn without_namespace(mut self) -> Self {
        self.namespace = None;
        self
    }

    /// Convert the named top-level element instead of the first one
    pub fn with_root_element(mut self, name: impl Into<String>) -> Self {
        self.root_element = Some(name.into());
        self
    }

    /// Toggle the Kafka Connect `connect.*` properties
    pub fn with_connect_metadata(mut self, enabled: bool) -> Self {
        self.connect_metadata = enabled;
        self
    }

    /// Toggle `doc` properties from `xs:documentation`
    pub fn with_include_docs(mut self, enabled: bool) -> Self {
        self.include_docs = enabled;
        self
    }

    /// Set the resource limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Whether output is pretty-printed
    pub fn pretty(&self) -> bool {
        self.pretty
    }

    /// Namespace of the root record
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Requested root element
    pub fn root_element(&self) -> Option<&str> {
        self.root_element.as_deref()
    }

    /// Whether Kafka Connect properties are emitted
    pub fn connect_metadata(&self) -> bool {
        self.connect_metadata
    }

    /// Whether documentation is emitted
    pub fn include_docs(&self) -> bool {
        self.include_docs
    }

    /// Resource limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}

/// XSD to Avro converter
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with the given options
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// The options in use
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Map an XSD document to the Avro schema tree without rendering it
    pub fn to_schema(&self, xsd: &[u8]) -> Result<AvroSchema> {
        let document = Document::parse_with_limits(xsd, &self.options.limits)?;
        tracing::debug!(root = %document.root().qname, "parsed XML document");

        let graph = SchemaGraph::from_document(&document)?;
        AvroMapper::new(&graph, &self.options).map_document()
    }

    /// Convert an XSD document to Avro schema JSON
    pub fn convert(&self, xsd: &[u8]) -> Result<String> {
        let schema = self.to_schema(xsd)?;
        let json = format::to_json(&schema, self.options.pretty)?;
        tracing::debug!(bytes = json.len(), pretty = self.options.pretty, "rendered schema");
        Ok(json)
    }

    /// Convert an XSD document given as text
    pub fn convert_str(&self, xsd: &str) -> Result<String> {
        self.convert(xsd.as_bytes())
    }

    /// Convert, rendering failures as the user-facing message
    pub fn convert_to_message(&self, xsd: &[u8]) -> String {
        match self.convert(xsd) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), error = %e, "conversion failed");
                e.user_message()
            }
        }
    }
}

/// Convert XSD text with default options
pub fn convert_xsd(xsd: &str, pretty: bool) -> Result<String> {
    Converter::new(ConvertOptions::default().with_pretty(pretty)).convert_str(xsd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::span;

    const PERSON: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="person">
    <xs:complexType>
      <xs:sequence>
        <xs:element name="name" type="xs:string"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
</xs:schema>"#;

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert!(!options.pretty());
        assert_eq!(options.namespace(), Some(DEFAULT_NAMESPACE));
        assert_eq!(options.root_element(), None);
        assert!(options.connect_metadata());
        assert!(!options.include_docs());
    }

    #[test]
    fn test_convert_compact() {
        let json = convert_xsd(PERSON, false).unwrap();
        assert_eq!(
            json,
            r#"["null",{"type":"record","name":"person","namespace":"de.deepshore.kafka","fields":[{"name":"name","type":"string"}],"connect.name":"de.deepshore.kafka.person"}]"#
        );
    }

    #[test]
    fn test_without_namespace() {
        let converter = Converter::new(
            ConvertOptions::new()
                .without_namespace()
                .with_connect_metadata(false),
        );
        let json = converter.convert_str(PERSON).unwrap();
        assert_eq!(
            json,
            r#"["null",{"type":"record","name":"person","fields":[{"name":"name","type":"string"}]}]"#
        );
    }

    #[test]
    fn test_input_limit_is_malformed_input() {
        let limits = Limits {
            max_input_size: 16,
            ..Limits::default()
        };
        let converter = Converter::new(ConvertOptions::new().with_limits(limits));
        let err = converter.convert_str(PERSON).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded { .. }));
        assert_eq!(err.kind(), ErrorKind::MalformedXml);
    }

    #[test]
    fn test_convert_to_message() {
        let converter = Converter::default();
        assert_eq!(
            converter.convert_to_message(b"<note/>"),
            "Please provide a valid xml schema."
        );
        assert_eq!(
            converter.convert_to_message(b""),
            "Please provide a valid xml file."
        );
    }

    #[test]
    fn test_converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }

    /// Collects the message of every event emitted while installed
    struct MessageRecorder {
        messages: Arc<Mutex<Vec<String>>>,
    }

    struct MessageVisitor<'a>(&'a mut String);

    impl tracing::field::Visit for MessageVisitor<'_> {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                *self.0 = format!("{:?}", value);
            }
        }
    }

    impl tracing::Subscriber for MessageRecorder {
        fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _span: &span::Attributes<'_>) -> span::Id {
            span::Id::from_u64(1)
        }

        fn record(&self, _span: &span::Id, _values: &span::Record<'_>) {}

        fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}

        fn event(&self, event: &tracing::Event<'_>) {
            let mut message = String::new();
            event.record(&mut MessageVisitor(&mut message));
            if let Ok(mut messages) = self.messages.lock() {
                messages.push(message);
            }
        }

        fn enter(&self, _span: &span::Id) {}

        fn exit(&self, _span: &span::Id) {}
    }

    #[test]
    fn test_each_stage_logs_once() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let recorder = MessageRecorder {
            messages: Arc::clone(&messages),
        };
        tracing::subscriber::with_default(recorder, || {
            Converter::default().convert_str(PERSON).unwrap();
        });

        let messages = messages.lock().unwrap();
        for stage in ["parsed XML document", "built schema graph", "rendered schema"] {
            let count = messages.iter().filter(|m| m.as_str() == stage).count();
            assert_eq!(count, 1, "{}: {:?}", stage, messages);
        }
    }
}
