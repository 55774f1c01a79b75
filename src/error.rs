//! Error types for xsd2avro
//!
//! Every failure the engine can produce is one of the variants of [`Error`].
//! Callers that only need the user-facing classification use [`Error::kind`]
//! and [`Error::user_message`].

use std::fmt;
use thiserror::Error;

/// Result type alias using xsd2avro Error
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned when the input is not well-formed XML
pub const MALFORMED_XML_MESSAGE: &str = "Please provide a valid xml file.";

/// Message returned when the input is XML but not a usable schema
pub const INVALID_SCHEMA_MESSAGE: &str = "Please provide a valid xml schema.";

/// Prefix of the message returned for constructs the target model cannot represent
pub const CONVERSION_MESSAGE_PREFIX: &str = "Error while converting XSD to AVRO: ";

/// Main error type for xsd2avro operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input could not be parsed as XML
    #[error("malformed XML: {0}")]
    MalformedXml(#[from] ParseError),

    /// Well-formed XML that is not a valid schema document
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// A record or field name outside the identifier grammar
    #[error("{0}")]
    IllegalIdentifier(#[from] IdentifierError),

    /// A type or construct the target model cannot represent
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A configured resource limit was exceeded
    #[error("limit exceeded: {message}")]
    LimitExceeded {
        /// Processing stage the limit applies to
        kind: LimitKind,
        /// Description of the violated limit
        message: String,
    },

    /// I/O error while reading input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The schema tree could not be written as JSON
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-facing classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Not XML at all
    MalformedXml,
    /// XML, but not a valid schema
    InvalidSchema,
    /// A valid schema with constructs that cannot be converted
    Conversion,
}

/// Stage a resource limit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// Reading the XML input
    Input,
    /// Walking the schema graph
    Mapping,
}

impl Error {
    /// Shorthand for an invalid schema error
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema(message.into())
    }

    /// Shorthand for an unsupported type error
    pub fn unsupported(construct: impl Into<String>) -> Self {
        Error::UnsupportedType(construct.into())
    }

    /// Classify this error into one of the three user-facing kinds
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedXml(_) | Error::Io(_) => ErrorKind::MalformedXml,
            Error::LimitExceeded {
                kind: LimitKind::Input,
                ..
            } => ErrorKind::MalformedXml,
            Error::InvalidSchema(_)
            | Error::LimitExceeded {
                kind: LimitKind::Mapping,
                ..
            } => ErrorKind::InvalidSchema,
            Error::IllegalIdentifier(_) | Error::UnsupportedType(_) | Error::Json(_) => {
                ErrorKind::Conversion
            }
        }
    }

    /// Render the plain-text message shown to users
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::MalformedXml => MALFORMED_XML_MESSAGE.to_string(),
            ErrorKind::InvalidSchema => INVALID_SCHEMA_MESSAGE.to_string(),
            ErrorKind::Conversion => format!("{}{}", CONVERSION_MESSAGE_PREFIX, self),
        }
    }
}

/// XML parsing error
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Byte offset in the input where parsing failed
    pub position: Option<usize>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    /// Set the byte offset
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(position) = self.position {
            write!(f, " (at byte {})", position)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Why a name was rejected by the identifier grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierFault {
    /// The name is empty
    Empty,
    /// The first character is not a letter or underscore
    Initial,
    /// A later character is not a letter, digit or underscore
    Character,
    /// The name is an Avro primitive type name
    Reserved,
}

/// A record or field name rejected by the identifier grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierError {
    /// The offending name, verbatim
    pub name: String,
    /// Which rule was violated
    pub fault: IdentifierFault,
}

impl IdentifierError {
    /// Create a new identifier error
    pub fn new(name: impl Into<String>, fault: IdentifierFault) -> Self {
        Self {
            name: name.into(),
            fault,
        }
    }
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fault {
            IdentifierFault::Empty => write!(f, "Empty name"),
            IdentifierFault::Initial => write!(f, "Illegal initial character: {}", self.name),
            IdentifierFault::Character => write!(f, "Illegal character in: {}", self.name),
            IdentifierFault::Reserved => write!(f, "Reserved name: {}", self.name),
        }
    }
}

impl std::error::Error for IdentifierError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("unexpected end of input").with_position(42);

        let msg = format!("{}", err);
        assert!(msg.contains("unexpected end of input"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn test_identifier_error_display() {
        let err = IdentifierError::new("bo-ok", IdentifierFault::Character);
        assert_eq!(err.to_string(), "Illegal character in: bo-ok");

        let err = IdentifierError::new("1st", IdentifierFault::Initial);
        assert_eq!(err.to_string(), "Illegal initial character: 1st");

        let err = IdentifierError::new("int", IdentifierFault::Reserved);
        assert_eq!(err.to_string(), "Reserved name: int");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ParseError::new("test").into();
        assert!(matches!(err, Error::MalformedXml(_)));
        assert_eq!(err.kind(), ErrorKind::MalformedXml);
    }

    #[test]
    fn test_user_messages() {
        let err: Error = IdentifierError::new("bo-ok", IdentifierFault::Character).into();
        assert_eq!(
            err.user_message(),
            "Error while converting XSD to AVRO: Illegal character in: bo-ok"
        );

        let err = Error::unsupported("anyType");
        assert_eq!(
            err.user_message(),
            "Error while converting XSD to AVRO: Unsupported type: anyType"
        );

        let err = Error::invalid_schema("no schema root");
        assert_eq!(err.user_message(), "Please provide a valid xml schema.");

        let err = Error::LimitExceeded {
            kind: LimitKind::Mapping,
            message: "too deep".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);

        let err = Error::LimitExceeded {
            kind: LimitKind::Input,
            message: "too big".to_string(),
        };
        assert_eq!(err.user_message(), "Please provide a valid xml file.");
    }
}
