//! Quote record and related types
//!
//! A quote is the only thing EWit stores: a body, plus an optional source
//! (who said it) and an optional comment (when, where, how). Absent optional
//! fields are empty strings, which is also how they are persisted.

pub mod format;
pub mod input;

use crate::error::{EwitError, Result};

pub use format::{ChannelCaps, Embed, format_plain, format_rich, parse_line};
pub use input::parse_input;

/// Field delimiter used in the backing file
pub const DELIMITER: char = '|';

/// A single stored quotation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quote {
    /// The quoted words, required
    pub body: String,

    /// Attribution, empty when unknown
    pub source: String,

    /// Extra context, empty when absent
    pub comment: String,
}

impl Quote {
    /// Create a quote from its three fields
    pub fn new(body: impl Into<String>, source: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            source: source.into(),
            comment: comment.into(),
        }
    }

    /// Create a quote with only a body
    pub fn body_only(body: impl Into<String>) -> Self {
        Self::new(body, "", "")
    }

    /// Check that the quote can be written as a single delimited line.
    ///
    /// The file format has no escaping, so a delimiter or line break inside
    /// any field would shift every following field on read-back.
    pub fn validate(&self, delimiter: char) -> Result<()> {
        if self.body.trim().is_empty() {
            return Err(EwitError::MalformedRegistration("quote body is empty".to_string()));
        }

        for (name, value) in [("body", &self.body), ("source", &self.source), ("comment", &self.comment)] {
            if value.contains(delimiter) {
                return Err(EwitError::MalformedRegistration(format!(
                    "{} contains the reserved delimiter '{}'",
                    name, delimiter
                )));
            }
            if value.contains(['\n', '\r']) {
                return Err(EwitError::MalformedRegistration(format!("{} contains a line break", name)));
            }
        }

        Ok(())
    }

    /// Serialize to one stored line, without the terminator
    pub fn to_line(&self, delimiter: char) -> String {
        let mut line = String::with_capacity(self.body.len() + self.source.len() + self.comment.len() + 2);
        line.push_str(&self.body);
        line.push(delimiter);
        line.push_str(&self.source);
        line.push(delimiter);
        line.push_str(&self.comment);
        line
    }
}

/// The record seeded into a fresh store in bootstrap mode
pub fn bootstrap_quote() -> Quote {
    Quote::new("Hi mortals, I'm buddy!", "Buddy", "at the dawn of time")
}
