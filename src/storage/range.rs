//! Inclusive ordinal ranges for ranged retrieval.

use std::fmt;
use std::str::FromStr;

use crate::error::{EwitError, Result};

/// Inclusive `[min, max]` window over record ordinals.
///
/// An unset bound means "from the first record" or "through the last record".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordRange {
    /// Lowest ordinal to include
    pub min: Option<usize>,
    /// Highest ordinal to include
    pub max: Option<usize>,
}

impl RecordRange {
    /// The whole store
    pub fn all() -> Self {
        Self::default()
    }

    /// Both bounds set
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Reject inverted bounds
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(EwitError::InvalidRange(format!("min {} is greater than max {}", min, max)));
        }
        Ok(())
    }

    /// Check whether an ordinal falls inside the range
    pub fn contains(&self, ordinal: usize) -> bool {
        self.min.is_none_or(|min| ordinal >= min) && self.max.is_none_or(|max| ordinal <= max)
    }
}

impl fmt::Display for RecordRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Option<usize>| b.map(|n| n.to_string()).unwrap_or_default();
        write!(f, "({},{})", bound(self.min), bound(self.max))
    }
}

impl FromStr for RecordRange {
    type Err = EwitError;

    /// Parse `min,max`, optionally wrapped in parentheses. Either side may be
    /// left empty, e.g. `(5,)` or `,10`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let (min, max) = inner
            .split_once(',')
            .ok_or_else(|| EwitError::InvalidRange(format!("expected 'min,max', got '{}'", s)))?;

        let bound = |text: &str| -> Result<Option<usize>> {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<usize>()
                .map(Some)
                .map_err(|_| EwitError::InvalidRange(format!("'{}' is not a record number", text)))
        };

        let range = Self {
            min: bound(min)?,
            max: bound(max)?,
        };
        range.validate()?;
        Ok(range)
    }
}
