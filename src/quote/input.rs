//! Parsing of free-form registration input into a quote.
//!
//! Expected shape, after the host has merged double-quoted runs into single
//! tokens:
//!
//! ```text
//! ["<quote body>", "-", "<source>,", "<optional", "comment...>"]
//! ```

use super::Quote;
use crate::error::{EwitError, Result};

/// Word separating the body from the attribution
pub const SOURCE_MARKER: &str = "-";

/// Separator between source and comment in the attribution text
const COMMENT_SEPARATOR: &str = ", ";

/// Build a quote from command tokens.
///
/// The first token is always the body. With more than two tokens the rest is
/// the attribution: the `-` marker is skipped when present, the remaining words
/// are joined with single spaces, and the text up to the first `", "` becomes
/// the source while everything after it becomes the comment.
pub fn parse_input<S: AsRef<str>>(tokens: &[S]) -> Result<Quote> {
    let Some(first) = tokens.first() else {
        return Err(EwitError::MalformedRegistration("no quote text given".to_string()));
    };

    let body = first.as_ref();
    if body.trim().is_empty() {
        return Err(EwitError::MalformedRegistration("quote body is empty".to_string()));
    }

    if tokens.len() <= 2 {
        return Ok(Quote::body_only(body));
    }

    let rest = if tokens[1].as_ref() == SOURCE_MARKER {
        &tokens[2..]
    } else {
        &tokens[1..]
    };
    let remainder = rest.iter().map(|t| t.as_ref()).collect::<Vec<&str>>().join(" ");

    let (source, comment) = match remainder.split_once(COMMENT_SEPARATOR) {
        Some((source, comment)) => (source, comment),
        None => (remainder.as_str(), ""),
    };

    Ok(Quote::new(body, source, comment))
}
