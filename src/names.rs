//! Name validation and utilities
//!
//! Target record and field names follow the grammar `[A-Za-z_][A-Za-z0-9_]*`.
//! Names outside it are rejected as they are, never rewritten.

use crate::error::{IdentifierError, IdentifierFault};
use once_cell::sync::Lazy;
use regex::Regex;

/// Primitive type names that cannot name a record
pub const RESERVED_NAMES: &[&str] = &[
    "null", "boolean", "int", "long", "float", "double", "bytes", "string",
];

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Check if a string is a valid target identifier
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Validate a target identifier and explain the first violated rule
pub fn validate_identifier(name: &str) -> std::result::Result<(), IdentifierError> {
    if is_valid_identifier(name) {
        return Ok(());
    }

    let fault = match name.chars().next() {
        None => IdentifierFault::Empty,
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => IdentifierFault::Initial,
        Some(_) => IdentifierFault::Character,
    };
    Err(IdentifierError::new(name, fault))
}

/// Validate a record name: an identifier that does not shadow a primitive
pub fn validate_record_name(name: &str) -> std::result::Result<(), IdentifierError> {
    validate_identifier(name)?;
    if RESERVED_NAMES.contains(&name) {
        return Err(IdentifierError::new(name, IdentifierFault::Reserved));
    }
    Ok(())
}

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}
