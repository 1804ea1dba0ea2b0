//! The quote cog: Ye Almighty Quotebot, Eternal Witness of Your Sinful Sayings.
//!
//! `QuoteCog` owns a store and answers parsed commands. Business operations
//! return `Result`; the `handle_*` entry points turn every outcome into a
//! `Reply` a host can deliver, so no error escapes to the end user raw.

use log::{debug, error, info, warn};
use rand::Rng;

use crate::command::{ListCommand, ListFormat, QuoteCommand};
use crate::error::{EwitError, Result};
use crate::export::{DEFAULT_BATCH_CHARS, DEFAULT_MAX_EXPORT_BYTES, ExportFile, batch_lines, export_file, list_numbered};
use crate::quote::{ChannelCaps, Embed, Quote, format_plain, format_rich, parse_input, parse_line};
use crate::storage::{QuoteStore, StoreConfig};

pub const MSG_NOT_FOUND: &str = "No quote with that number exists.";
pub const MSG_EMPTY: &str = "No quotes stored yet.";
pub const MSG_REGISTER_FAILED: &str = "Couldn't add that quote, sorry. Check your formatting and try again.";
pub const MSG_FETCH_FAILED: &str = "Something went wrong fetching that quote.";
pub const MSG_LIST_FAILED: &str = "Something went wrong listing quotes.";
pub const MSG_NOTHING_LISTED: &str = "No quotes in that range.";

/// Limits applied to listings and exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CogSettings {
    /// Character budget of one text batch
    pub batch_chars: usize,
    /// Largest raw file handed over by a file export
    pub max_export_bytes: u64,
}

impl Default for CogSettings {
    fn default() -> Self {
        Self {
            batch_chars: DEFAULT_BATCH_CHARS,
            max_export_bytes: DEFAULT_MAX_EXPORT_BYTES,
        }
    }
}

/// Transport-neutral answer to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// One plain message
    Text(String),
    /// One rich message
    Embed(Embed),
    /// Several messages, sent in order
    Batches(Vec<String>),
    /// A file attachment
    File(ExportFile),
}

impl Reply {
    /// Text of a single-message reply, if it is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Quote bot bound to one store
#[derive(Debug, Clone)]
pub struct QuoteCog {
    store: QuoteStore,
    settings: CogSettings,
}

impl QuoteCog {
    /// Wrap an already opened store
    pub fn new(store: QuoteStore, settings: CogSettings) -> Self {
        Self { store, settings }
    }

    /// Open (and if needed create) the store, then wrap it
    pub fn open(config: StoreConfig, settings: CogSettings) -> Result<Self> {
        let store = QuoteStore::open(config)?;
        info!("EWit online, quotes at {}", store.path().display());
        Ok(Self::new(store, settings))
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn settings(&self) -> &CogSettings {
        &self.settings
    }

    /// Pick a uniformly random user quote
    pub fn random_quote(&self) -> Result<(usize, Quote)> {
        let first = self.store.first_ordinal();
        let count = self.store.count()?;
        if count <= first {
            return Err(EwitError::EmptyStore);
        }

        let ordinal = rand::rng().random_range(first..count);
        Ok((ordinal, self.quote_by_id(ordinal)?))
    }

    /// Quote stored at `ordinal`
    pub fn quote_by_id(&self, ordinal: usize) -> Result<Quote> {
        let raw = self.store.read_at(ordinal)?;
        parse_line(&raw, self.store.delimiter())
    }

    /// Parse registration tokens and store the quote, returning its ordinal
    pub fn register<S: AsRef<str>>(&self, tokens: &[S]) -> Result<usize> {
        let quote = parse_input(tokens)?;
        let ordinal = self.store.append(&quote)?;
        debug!("Registered quote #{} from {:?}", ordinal, quote.source);
        Ok(ordinal)
    }

    /// Produce a listing or export reply
    pub fn list(&self, command: &ListCommand) -> Result<Reply> {
        match command.format {
            ListFormat::Text => {
                let lines = list_numbered(&self.store, command.range)?;
                if lines.is_empty() {
                    return Ok(Reply::Text(MSG_NOTHING_LISTED.to_string()));
                }
                Ok(Reply::Batches(batch_lines(&lines, self.settings.batch_chars)))
            }
            ListFormat::File => Ok(Reply::File(export_file(&self.store, self.settings.max_export_bytes)?)),
        }
    }

    /// Answer a `quote` command
    pub fn handle_quote(&self, command: &QuoteCommand, caps: ChannelCaps) -> Reply {
        match command {
            QuoteCommand::Random => match self.random_quote() {
                Ok((_, quote)) => render(&quote, caps),
                Err(e) => fetch_error_reply(e),
            },
            QuoteCommand::FetchById(ordinal) => match self.quote_by_id(*ordinal) {
                Ok(quote) => render(&quote, caps),
                Err(e) => fetch_error_reply(e),
            },
            QuoteCommand::Register(tokens) => match self.register(tokens) {
                Ok(ordinal) => Reply::Text(format!("Quote #{} added!", ordinal)),
                Err(e) => {
                    error!("Failed to register quote {:?}: {}", tokens, e);
                    Reply::Text(MSG_REGISTER_FAILED.to_string())
                }
            },
        }
    }

    /// Answer a `list` command
    pub fn handle_list(&self, command: &ListCommand) -> Reply {
        match self.list(command) {
            Ok(reply) => reply,
            Err(EwitError::ExportTooLarge { size, limit }) => {
                warn!("Export refused: {} bytes over limit {}", size, limit);
                Reply::Text(format!(
                    "The quote file is too large to send ({} bytes, limit is {} bytes).",
                    size, limit
                ))
            }
            Err(e @ (EwitError::InvalidRange(_) | EwitError::InvalidArgument(_))) => Reply::Text(e.to_string()),
            Err(e) => {
                error!("Failed to list quotes: {}", e);
                Reply::Text(MSG_LIST_FAILED.to_string())
            }
        }
    }
}

fn render(quote: &Quote, caps: ChannelCaps) -> Reply {
    if caps.embeds {
        Reply::Embed(format_rich(quote))
    } else {
        Reply::Text(format_plain(quote, None))
    }
}

fn fetch_error_reply(err: EwitError) -> Reply {
    match err {
        EwitError::IndexOutOfRange { index, count } => {
            debug!("Quote #{} requested, store holds {}", index, count);
            Reply::Text(MSG_NOT_FOUND.to_string())
        }
        EwitError::EmptyStore => Reply::Text(MSG_EMPTY.to_string()),
        e => {
            error!("Failed to fetch quote: {}", e);
            Reply::Text(MSG_FETCH_FAILED.to_string())
        }
    }
}
