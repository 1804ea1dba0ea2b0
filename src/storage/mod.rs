//! Storage layer for EWit - a line-delimited flat file of quotes.
//!
//! One quote per line, fields joined by a delimiter, no header. A record's
//! 0-based line position is its only identifier, and appending is the only
//! mutation.

mod flatfile;
mod range;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::quote::DELIMITER;

pub use flatfile::{QuoteStore, RecordLines};
pub use range::RecordRange;

/// What a freshly created store file starts with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Start empty; user quotes are numbered from 0
    Empty,
    /// Write the bootstrap quote at ordinal 0 and reserve it, so user quotes
    /// are numbered from 1
    #[default]
    Bootstrap,
}

/// Everything a store needs to locate and interpret its file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backing file
    pub path: PathBuf,
    /// Field delimiter
    pub delimiter: char,
    /// Seeding of a newly created file
    pub seed: SeedPolicy,
}

impl StoreConfig {
    /// Config with the default delimiter and bootstrap seeding
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: DELIMITER,
            seed: SeedPolicy::default(),
        }
    }

    /// Replace the seed policy
    pub fn with_seed(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }
}
