//! XSD built-in type to Avro type table
//!
//! The table is built once per process and only read afterwards.

use super::types::{LogicalType, Primitive};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// What an XSD built-in type maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinMapping {
    /// A plain primitive
    Primitive(Primitive),
    /// A logical type over a primitive
    Logical(LogicalType),
}

/// Lookup table from XSD built-in local names to Avro types
#[derive(Debug, Clone)]
pub struct PrimitiveTable {
    entries: HashMap<&'static str, BuiltinMapping>,
}

static GLOBAL: Lazy<PrimitiveTable> = Lazy::new(PrimitiveTable::standard);

impl PrimitiveTable {
    /// The shared standard table
    pub fn global() -> &'static PrimitiveTable {
        &GLOBAL
    }

    /// Build the standard table
    pub fn standard() -> Self {
        use BuiltinMapping::{Logical, Primitive as P};

        let mut entries = HashMap::new();

        for name in [
            "string",
            "normalizedString",
            "token",
            "language",
            "Name",
            "NCName",
            "ID",
            "IDREF",
            "ENTITY",
            "NMTOKEN",
            "anyURI",
            "QName",
            "NOTATION",
            "duration",
            "gYear",
            "gYearMonth",
            "gMonth",
            "gMonthDay",
            "gDay",
            "anySimpleType",
        ] {
            entries.insert(name, P(Primitive::String));
        }

        entries.insert("boolean", P(Primitive::Boolean));

        for name in ["int", "short", "byte", "unsignedShort", "unsignedByte"] {
            entries.insert(name, P(Primitive::Int));
        }

        for name in [
            "integer",
            "long",
            "unsignedInt",
            "unsignedLong",
            "nonNegativeInteger",
            "positiveInteger",
            "nonPositiveInteger",
            "negativeInteger",
        ] {
            entries.insert(name, P(Primitive::Long));
        }

        entries.insert("float", P(Primitive::Float));
        entries.insert("double", P(Primitive::Double));
        entries.insert("decimal", P(Primitive::Double));
        entries.insert("hexBinary", P(Primitive::Bytes));
        entries.insert("base64Binary", P(Primitive::Bytes));

        entries.insert("date", Logical(LogicalType::Date));
        entries.insert("time", Logical(LogicalType::TimeMillis));
        entries.insert("dateTime", Logical(LogicalType::TimestampMillis));

        Self { entries }
    }

    /// Look up a built-in by local name
    pub fn lookup(&self, name: &str) -> Option<BuiltinMapping> {
        self.entries.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_mappings() {
        let table = PrimitiveTable::global();
        assert_eq!(table.lookup("string"), Some(BuiltinMapping::Primitive(Primitive::String)));
        assert_eq!(table.lookup("float"), Some(BuiltinMapping::Primitive(Primitive::Float)));
        assert_eq!(table.lookup("integer"), Some(BuiltinMapping::Primitive(Primitive::Long)));
        assert_eq!(table.lookup("date"), Some(BuiltinMapping::Logical(LogicalType::Date)));
        assert_eq!(
            table.lookup("dateTime"),
            Some(BuiltinMapping::Logical(LogicalType::TimestampMillis))
        );
    }

    #[test]
    fn test_unknown_builtins() {
        let table = PrimitiveTable::global();
        assert_eq!(table.lookup("anyType"), None);
        assert_eq!(table.lookup("NMTOKENS"), None);
        assert_eq!(table.lookup("String"), None);
    }
}
