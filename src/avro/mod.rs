//! Avro schema model, type mapping and JSON rendering

pub mod format;
pub mod mapper;
pub mod primitives;
pub mod types;

pub use format::{to_json, CanonicalPrettyFormatter};
pub use mapper::AvroMapper;
pub use primitives::{BuiltinMapping, PrimitiveTable};
pub use types::{AvroSchema, Field, LogicalSchema, LogicalType, Primitive, Record};
