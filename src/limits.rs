//! Limits and constraints for schema conversion
//!
//! This module defines the limits that keep a single conversion bounded in
//! memory and stack usage, whatever the input looks like.

use crate::error::{Error, LimitKind, Result};

/// Limits configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes
    pub max_input_size: usize,

    /// Maximum element nesting depth of the XML document
    pub max_xml_depth: usize,

    /// Maximum recursion depth while mapping the schema graph
    pub max_mapping_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_size: 10 * 1024 * 1024, // 10 MB
            max_xml_depth: 256,
            max_mapping_depth: 64,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_input_size: 1024 * 1024, // 1 MB
            max_xml_depth: 64,
            max_mapping_depth: 16,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_input_size: 100 * 1024 * 1024, // 100 MB
            max_xml_depth: 4096,
            max_mapping_depth: 512,
        }
    }

    /// Check if the input size is within limits
    pub fn check_input_size(&self, size: usize) -> Result<()> {
        if size > self.max_input_size {
            Err(Error::LimitExceeded {
                kind: LimitKind::Input,
                message: format!(
                    "input size {} bytes exceeds maximum {} bytes",
                    size, self.max_input_size
                ),
            })
        } else {
            Ok(())
        }
    }

    /// Check if XML depth is within limits
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_xml_depth {
            Err(Error::LimitExceeded {
                kind: LimitKind::Input,
                message: format!("XML depth {} exceeds maximum {}", depth, self.max_xml_depth),
            })
        } else {
            Ok(())
        }
    }

    /// Check if the mapping recursion depth is within limits
    pub fn check_mapping_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_mapping_depth {
            Err(Error::LimitExceeded {
                kind: LimitKind::Mapping,
                message: format!(
                    "schema nesting depth {} exceeds maximum {}",
                    depth, self.max_mapping_depth
                ),
            })
        } else {
            Ok(())
        }
    }
}
