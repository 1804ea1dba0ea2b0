//! Listing and export of stored quotes.
//!
//! Text listings go out through a transport with a per-message size limit, so
//! numbered lines are packed into batches that never split a quote. Bulk
//! export hands over the raw backing file, capped at a fixed size.

use chrono::{DateTime, Local};
use log::{debug, error, info};

use crate::error::{EwitError, Result};
use crate::quote::{format_plain, parse_line};
use crate::storage::{QuoteStore, RecordRange};

/// Character budget of one text batch
pub const DEFAULT_BATCH_CHARS: usize = 2000;

/// Largest file the bulk export will hand over (8 MiB)
pub const DEFAULT_MAX_EXPORT_BYTES: u64 = 8 * 1024 * 1024;

/// Raw store contents ready for transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested name, embedding the export time
    pub filename: String,
    /// File contents
    pub bytes: Vec<u8>,
}

/// Format every record in `range` as a numbered line, in store order.
///
/// Lines that don't parse as a quote are logged and left out; the remaining
/// quotes keep their own ordinals.
pub fn list_numbered(store: &QuoteStore, range: RecordRange) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for record in store.read_range(range)? {
        let (ordinal, raw) = record?;
        match parse_line(&raw, store.delimiter()) {
            Ok(quote) => lines.push(format_plain(&quote, Some(ordinal))),
            Err(e) => error!("Skipping quote #{} in listing: {}", ordinal, e),
        }
    }
    debug!("Listed {} quotes in range {}", lines.len(), range);
    Ok(lines)
}

/// Pack lines into newline-joined batches of at most `budget` characters.
///
/// A line is never split. A single line longer than the budget becomes a
/// batch of its own. Joining the batches with `\n` gives back the input lines
/// joined with `\n`.
pub fn batch_lines<S: AsRef<str>>(lines: &[S], budget: usize) -> Vec<String> {
    let mut batches = Vec::new();
    // (text, length in chars) of the batch being filled
    let mut current: Option<(String, usize)> = None;

    for line in lines {
        let line = line.as_ref();
        let line_chars = line.chars().count();

        match current.as_mut() {
            Some((text, chars)) if *chars + 1 + line_chars <= budget => {
                text.push('\n');
                text.push_str(line);
                *chars += 1 + line_chars;
            }
            _ => {
                if let Some((text, _)) = current.take() {
                    batches.push(text);
                }
                current = Some((line.to_string(), line_chars));
            }
        }
    }

    if let Some((text, _)) = current {
        batches.push(text);
    }
    batches
}

/// Export filename for a given moment
pub fn export_filename(at: DateTime<Local>) -> String {
    format!("quotes-{}.csv", at.format("%Y%m%d-%H%M%S"))
}

/// Read the raw store for bulk transfer, refusing files over `limit` bytes
pub fn export_file(store: &QuoteStore, limit: u64) -> Result<ExportFile> {
    let size = store.size_bytes()?;
    if size > limit {
        return Err(EwitError::ExportTooLarge { size, limit });
    }

    let bytes = store.read_bytes()?;
    let filename = export_filename(Local::now());
    info!("Exporting {} bytes as {}", bytes.len(), filename);
    Ok(ExportFile { filename, bytes })
}
