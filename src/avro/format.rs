//! JSON rendering of Avro schemas
//!
//! Compact output is plain `serde_json`. Pretty output follows the layout of
//! the Jackson default pretty printer used by the Avro and Kafka Connect
//! toolchains, so schemas diff cleanly against ones produced there:
//!
//! ```text
//! [ "null", {
//!   "type" : "record",
//!   "fields" : [ {
//!     "name" : "id",
//!     "type" : "string"
//!   } ]
//! } ]
//! ```

use crate::error::Result;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// Pretty printer with inline arrays and `" : "` separators
///
/// Only objects increase the indentation level; array members stay on the
/// line of the opening bracket.
#[derive(Debug, Clone, Default)]
pub struct CanonicalPrettyFormatter {
    current_indent: usize,
    has_value: bool,
}

impl CanonicalPrettyFormatter {
    const INDENT: &'static [u8] = b"  ";

    /// Create a formatter at nesting level zero
    pub fn new() -> Self {
        Self::default()
    }

    fn indent<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for _ in 0..self.current_indent {
            writer.write_all(Self::INDENT)?;
        }
        Ok(())
    }
}

impl Formatter for CanonicalPrettyFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.has_value = false;
        writer.write_all(b"[")
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" ]")
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        writer.write_all(if first { b" " } else { b", " })
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.current_indent += 1;
        self.has_value = false;
        writer.write_all(b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.current_indent -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            self.indent(writer)?;
        } else {
            writer.write_all(b" ")?;
        }
        writer.write_all(b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        writer.write_all(if first { b"\n" } else { b",\n" })?;
        self.indent(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" : ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }
}

/// Render any serializable value with [`CanonicalPrettyFormatter`]
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = Vec::with_capacity(256);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, CanonicalPrettyFormatter::new());
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Render a value as compact JSON
pub fn to_compact_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Render a value in the requested layout
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        to_pretty_string(value)
    } else {
        to_compact_string(value)
    }
}
