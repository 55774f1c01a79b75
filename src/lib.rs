//! # xsd2avro
//!
//! Converts XML Schema (XSD) documents describing form data into Avro schema
//! JSON, in the layout used by the Kafka Connect Avro converter.
//!
//! ## Pipeline
//!
//! - [`documents`]: well-formed XML into an element tree
//! - [`schema`]: element tree into a graph of types and declarations
//! - [`avro`]: graph into an Avro schema tree, rendered as compact or pretty JSON
//! - [`convert`]: runs the stages and classifies failures
//! - [`service`]: request/response contract of the conversion endpoint
//!
//! ## Example
//!
//! ```rust
//! use xsd2avro::{ConvertOptions, Converter};
//!
//! let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
//!   <xs:element name="note">
//!     <xs:complexType>
//!       <xs:sequence><xs:element name="to" type="xs:string"/></xs:sequence>
//!     </xs:complexType>
//!   </xs:element>
//! </xs:schema>"#;
//!
//! let converter = Converter::new(ConvertOptions::default().with_connect_metadata(false));
//! let json = converter.convert_str(xsd)?;
//! assert_eq!(
//!     json,
//!     r#"["null",{"type":"record","name":"note","namespace":"de.deepshore.kafka","fields":[{"name":"to","type":"string"}]}]"#
//! );
//! # Ok::<(), xsd2avro::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;

pub mod names;
pub mod namespaces;

pub mod documents;
pub mod loaders;

pub mod avro;
pub mod schema;

pub mod convert;
pub mod service;

pub use convert::{convert_xsd, ConvertOptions, Converter, DEFAULT_NAMESPACE};
pub use error::{Error, ErrorKind, Result};

/// Version of the xsd2avro library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
