//! Conversion between stored lines and display text.

use super::Quote;
use crate::error::{EwitError, Result};

/// Output capabilities of the channel a reply is delivered to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelCaps {
    /// Channel can render rich embeds
    pub embeds: bool,
}

/// Two-part rich rendering of a quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    /// Quoted body
    pub title: String,

    /// Attribution line, absent when the quote has neither source nor comment
    pub footer: Option<String>,
}

/// Split a stored line back into a quote.
///
/// Empty chunks are dropped before fields are assigned, so a line with an
/// empty source but a comment reads back with the comment in the source slot.
pub fn parse_line(raw: &str, delimiter: char) -> Result<Quote> {
    let chunks: Vec<&str> = raw
        .trim_end_matches(['\r', '\n'])
        .split(delimiter)
        .filter(|chunk| !chunk.is_empty())
        .collect();

    match chunks.as_slice() {
        [body] => Ok(Quote::body_only(*body)),
        [body, source] => Ok(Quote::new(*body, *source, "")),
        [body, source, comment] => Ok(Quote::new(*body, *source, *comment)),
        _ => Err(EwitError::CorruptRecord(raw.to_string())),
    }
}

/// Render a quote as a single line of plain text.
///
/// `"{body}"`, prefixed with `{index}) ` when an index is given, followed by
/// ` - {source}` and `, {comment}` for whichever of those is non-empty.
pub fn format_plain(quote: &Quote, index: Option<usize>) -> String {
    let mut text = String::new();
    if let Some(index) = index {
        text.push_str(&format!("{}) ", index));
    }
    text.push('"');
    text.push_str(&quote.body);
    text.push('"');
    if !quote.source.is_empty() {
        text.push_str(" - ");
        text.push_str(&quote.source);
    }
    if !quote.comment.is_empty() {
        text.push_str(", ");
        text.push_str(&quote.comment);
    }
    text
}

/// Render a quote as a title/footer pair
pub fn format_rich(quote: &Quote) -> Embed {
    let footer = match (quote.source.is_empty(), quote.comment.is_empty()) {
        (true, true) => None,
        (false, true) => Some(quote.source.clone()),
        (true, false) => Some(quote.comment.clone()),
        (false, false) => Some(format!("{}, {}", quote.source, quote.comment)),
    };

    Embed {
        title: format!("\"{}\"", quote.body),
        footer,
    }
}
