//! EWit - Ye Almighty Quotebot, Eternal Witness of Your Sinful Sayings
//!
//! EWit records the things people say in a line-delimited flat file and
//! answers chat-style commands: register a quote, fetch one by number or at
//! random, and list or export the whole collection.

pub mod cog;
pub mod command;
pub mod error;
pub mod export;
pub mod import;
pub mod quote;
pub mod storage;

pub use cog::{CogSettings, QuoteCog, Reply};
pub use error::{EwitError, Result};
