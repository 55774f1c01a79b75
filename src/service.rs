//! Request handling for the conversion endpoint
//!
//! Transport-independent: an HTTP layer forwards the request body and the
//! raw `pretty` query value and writes the [`Response`] back unchanged.
//! Conversion failures are answered with status 200 and a plain-text message.

use crate::convert::{ConvertOptions, Converter};

/// Text returned by the greeting endpoint
pub const GREETING: &str = "Hello! I can convert xsd to avro.";

/// Content type of every response
pub const TEXT_PLAIN: &str = "text/plain";

/// A response ready to be written by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Content type header value
    pub content_type: &'static str,
    /// Response body
    pub body: String,
}

impl Response {
    fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: TEXT_PLAIN,
            body: body.into(),
        }
    }
}

/// The greeting served on the service root
pub fn greeting() -> Response {
    Response::ok(GREETING)
}

/// Convert a request body with default options
pub fn handle_convert(body: &[u8], pretty_query: Option<&str>) -> Response {
    ConvertService::default().convert(body, pretty_query)
}

/// Interpret the `pretty` query parameter; only `true` enables it
pub fn pretty_flag(value: Option<&str>) -> bool {
    value.map_or(false, |v| v.trim().eq_ignore_ascii_case("true"))
}

/// Conversion endpoint with configurable base options
#[derive(Debug, Clone, Default)]
pub struct ConvertService {
    options: ConvertOptions,
}

impl ConvertService {
    /// Create a service; the `pretty` query overrides `options.pretty()` per request
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Answer the greeting endpoint
    pub fn greet(&self) -> Response {
        greeting()
    }

    /// Answer a conversion request
    pub fn convert(&self, body: &[u8], pretty_query: Option<&str>) -> Response {
        let pretty = match pretty_query {
            Some(_) => pretty_flag(pretty_query),
            None => self.options.pretty(),
        };
        tracing::debug!(bytes = body.len(), pretty, "conversion request");

        let converter = Converter::new(self.options.clone().with_pretty(pretty));
        Response::ok(converter.convert_to_message(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="note"><xs:complexType><xs:sequence>
    <xs:element name="to" type="xs:string"/>
  </xs:sequence></xs:complexType></xs:element>
</xs:schema>"#;

    #[test]
    fn test_greeting() {
        let response = greeting();
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, TEXT_PLAIN);
        assert_eq!(response.body, "Hello! I can convert xsd to avro.");
    }

    #[test]
    fn test_pretty_flag() {
        assert!(pretty_flag(Some("true")));
        assert!(pretty_flag(Some("TRUE")));
        assert!(!pretty_flag(Some("false")));
        assert!(!pretty_flag(Some("yes")));
        assert!(!pretty_flag(None));
    }

    #[test]
    fn test_convert_layouts() {
        let compact = handle_convert(SCHEMA.as_bytes(), None);
        assert_eq!(compact.status, 200);
        assert!(compact.body.starts_with(r#"["null",{"type":"record""#));

        let pretty = handle_convert(SCHEMA.as_bytes(), Some("true"));
        assert!(pretty.body.starts_with("[ \"null\", {\n  \"type\" : \"record\","));
    }

    #[test]
    fn test_errors_are_plain_text_with_status_200() {
        let response = handle_convert(b"<xs:schema", None);
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "Please provide a valid xml file.");

        let response = handle_convert(b"<note><to>x</to></note>", Some("true"));
        assert_eq!(response.body, "Please provide a valid xml schema.");
    }

    #[test]
    fn test_service_default_pretty() {
        let service = ConvertService::new(ConvertOptions::default().with_pretty(true));
        assert!(service.convert(SCHEMA.as_bytes(), None).body.starts_with("[ \"null\""));
        assert!(service
            .convert(SCHEMA.as_bytes(), Some("false"))
            .body
            .starts_with("[\"null\""));
    }
}
