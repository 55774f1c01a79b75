//! Occurrence bounds of schema particles
//!
//! `minOccurs` / `maxOccurs` as declared on elements and model groups.
//!
//! Reference: https://www.w3.org/TR/xmlschema-1/#p

use crate::error::{Error, Result};
use std::fmt;

/// Upper occurrence bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxOccurs {
    /// A finite bound
    Bounded(u32),
    /// `maxOccurs="unbounded"`
    Unbounded,
}

impl MaxOccurs {
    /// Product of two bounds, unbounded dominating any non-zero bound
    pub fn times(self, other: MaxOccurs) -> MaxOccurs {
        match (self, other) {
            (MaxOccurs::Bounded(0), _) | (_, MaxOccurs::Bounded(0)) => MaxOccurs::Bounded(0),
            (MaxOccurs::Bounded(a), MaxOccurs::Bounded(b)) => MaxOccurs::Bounded(a.saturating_mul(b)),
            _ => MaxOccurs::Unbounded,
        }
    }
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxOccurs::Bounded(n) => write!(f, "{}", n),
            MaxOccurs::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Occurrence bounds for a particle (minOccurs, maxOccurs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    pub min: u32,
    /// Maximum number of occurrences (default 1)
    pub max: MaxOccurs,
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: u32, max: MaxOccurs) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub fn once() -> Self {
        Self::new(1, MaxOccurs::Bounded(1))
    }

    /// Optional occurrence (0, 1)
    pub fn optional() -> Self {
        Self::new(0, MaxOccurs::Bounded(1))
    }

    /// Zero or more (0, unbounded)
    pub fn zero_or_more() -> Self {
        Self::new(0, MaxOccurs::Unbounded)
    }

    /// One or more (1, unbounded)
    pub fn one_or_more() -> Self {
        Self::new(1, MaxOccurs::Unbounded)
    }

    /// Parse `minOccurs` / `maxOccurs` attribute values, applying the defaults
    pub fn parse(min: Option<&str>, max: Option<&str>) -> Result<Self> {
        let min = match min.map(str::trim) {
            None => 1,
            Some(value) => value
                .parse::<u32>()
                .map_err(|_| Error::invalid_schema(format!("invalid minOccurs '{}'", value)))?,
        };

        let max = match max.map(str::trim) {
            None => MaxOccurs::Bounded(1),
            Some("unbounded") => MaxOccurs::Unbounded,
            Some(value) => MaxOccurs::Bounded(
                value
                    .parse::<u32>()
                    .map_err(|_| Error::invalid_schema(format!("invalid maxOccurs '{}'", value)))?,
            ),
        };

        if let MaxOccurs::Bounded(max) = max {
            if max < min {
                return Err(Error::invalid_schema(format!(
                    "maxOccurs {} is smaller than minOccurs {}",
                    max, min
                )));
            }
        }

        Ok(Self { min, max })
    }

    /// Bounds of a particle nested inside a group with bounds `outer`
    pub fn within(self, outer: Occurs) -> Occurs {
        Occurs {
            min: self.min.saturating_mul(outer.min),
            max: self.max.times(outer.max),
        }
    }

    /// Same bounds with the lower bound dropped to zero
    pub fn emptiable(self) -> Occurs {
        Occurs { min: 0, ..self }
    }

    /// Check if this particle can be absent (minOccurs == 0)
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Check if this particle is prohibited (maxOccurs == 0)
    pub fn is_empty(&self) -> bool {
        self.max == MaxOccurs::Bounded(0)
    }

    /// Check if particle has maxOccurs == 1
    pub fn is_single(&self) -> bool {
        self.max == MaxOccurs::Bounded(1)
    }

    /// Check if particle can have multiple occurrences
    pub fn is_multiple(&self) -> bool {
        !self.is_empty() && !self.is_single()
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}
