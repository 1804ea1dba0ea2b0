//! Command model for the quote cog.
//!
//! Raw command tokens are classified into a tagged variant before any store
//! access happens.

use std::fmt;
use std::str::FromStr;

use crate::error::{EwitError, Result};
use crate::storage::RecordRange;

/// What a `quote` invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteCommand {
    /// No arguments: any stored quote
    Random,
    /// Leading number: the quote at that ordinal
    FetchById(usize),
    /// Anything else: tokens of a new quote
    Register(Vec<String>),
}

impl QuoteCommand {
    /// Classify command tokens.
    ///
    /// A first token made only of ASCII digits selects a fetch; a number too
    /// large to be an ordinal can't name a stored quote and fetches `usize::MAX`,
    /// which reports as not found.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let Some(first) = tokens.first().map(|t| t.as_ref()) else {
            return Self::Random;
        };

        if !first.is_empty() && first.bytes().all(|b| b.is_ascii_digit()) {
            return Self::FetchById(first.parse().unwrap_or(usize::MAX));
        }

        Self::Register(tokens.iter().map(|t| t.as_ref().to_string()).collect())
    }
}

/// Output form of a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFormat {
    /// Numbered lines, delivered in batches
    #[default]
    Text,
    /// The raw backing file
    File,
}

impl FromStr for ListFormat {
    type Err = EwitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "file" | "csv" => Ok(Self::File),
            other => Err(EwitError::InvalidArgument(format!(
                "unknown list format '{}', expected text, file or csv",
                other
            ))),
        }
    }
}

impl fmt::Display for ListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::File => write!(f, "file"),
        }
    }
}

/// A `list` invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCommand {
    /// Requested output form
    pub format: ListFormat,
    /// Records to include; ignored for file exports, which send everything
    pub range: RecordRange,
}

impl ListCommand {
    /// Parse list tokens: an optional format word and an optional range, in
    /// either order.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut command = Self::default();
        for token in tokens {
            let token = token.as_ref();
            if token.contains(',') {
                command.range = token.parse()?;
            } else {
                command.format = token.parse()?;
            }
        }
        Ok(command)
    }
}
