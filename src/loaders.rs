//! Input loading utilities
//!
//! Reads schema input from files, standard input or memory, applying the
//! input size limit before anything is parsed.

use crate::error::Result;
use crate::limits::Limits;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Where a schema document comes from
#[derive(Debug, Clone)]
pub enum Source {
    /// File system path
    Path(PathBuf),
    /// Standard input
    Stdin,
    /// In-memory bytes
    Bytes(Vec<u8>),
}

impl Source {
    /// Interpret a command-line argument; `-` means standard input
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::Path(PathBuf::from(arg))
        }
    }

    /// Human readable description for log messages
    pub fn describe(&self) -> String {
        match self {
            Source::Path(p) => p.display().to_string(),
            Source::Stdin => "<stdin>".to_string(),
            Source::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }
}

/// Resource loader for schema documents
#[derive(Debug, Default)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Load a source as bytes
    pub fn load_bytes(&self, source: &Source) -> Result<Vec<u8>> {
        let content = match source {
            Source::Path(path) => {
                let metadata = fs::metadata(path)?;
                self.limits.check_input_size(metadata.len() as usize)?;
                fs::read(path)?
            }
            Source::Stdin => {
                let mut content = Vec::new();
                // Read one byte past the limit so oversized input is detected without buffering it all
                let cap = self.limits.max_input_size as u64 + 1;
                std::io::stdin().lock().take(cap).read_to_end(&mut content)?;
                content
            }
            Source::Bytes(bytes) => bytes.clone(),
        };

        self.limits.check_input_size(content.len())?;
        tracing::debug!(source = %source.describe(), bytes = content.len(), "loaded input");
        Ok(content)
    }
}
