//! One-shot import of legacy quote dumps.
//!
//! The legacy format is a JSON array of free-form strings. Their layout is
//! too inconsistent to re-parse, so each string is stored as a body-only
//! quote.

use std::io::Read;

use log::{info, warn};

use crate::error::Result;
use crate::quote::Quote;
use crate::storage::{QuoteStore, RecordRange};

/// Outcome of an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Entries written to the store
    pub imported: usize,
    /// Entries inside the window that could not be stored
    pub skipped: usize,
}

/// Append the legacy entries whose array index lies in `window`.
pub fn import_json<R: Read>(reader: R, store: &QuoteStore, window: RecordRange) -> Result<ImportSummary> {
    window.validate()?;
    let entries: Vec<String> = serde_json::from_reader(reader)?;
    let mut summary = ImportSummary::default();

    for (index, entry) in entries.iter().enumerate() {
        if !window.contains(index) {
            continue;
        }

        match store.append(&Quote::body_only(entry.as_str())) {
            Ok(_) => summary.imported += 1,
            Err(e) => {
                warn!("Skipping legacy quote #{}: {}", index, e);
                summary.skipped += 1;
            }
        }
    }

    info!(
        "Imported {} legacy quotes ({} skipped) into {}",
        summary.imported,
        summary.skipped,
        store.path().display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EwitError;
    use crate::storage::{SeedPolicy, StoreConfig};
    use tempfile::TempDir;

    fn create_test_store() -> (QuoteStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::new(temp_dir.path().join("quotes.csv")).with_seed(SeedPolicy::Empty);
        (QuoteStore::open(config).unwrap(), temp_dir)
    }

    #[test]
    fn test_import_all() {
        let (store, _temp) = create_test_store();
        let json = r#"["\"Hello\" - Bob", "second one"]"#;

        let summary = import_json(json.as_bytes(), &store, RecordRange::all()).unwrap();
        assert_eq!(summary, ImportSummary { imported: 2, skipped: 0 });
        assert_eq!(store.read_at(0).unwrap(), "\"Hello\" - Bob||");
        assert_eq!(store.read_at(1).unwrap(), "second one||");
    }

    #[test]
    fn test_import_window() {
        let (store, _temp) = create_test_store();
        let json = r#"["a", "b", "c", "d"]"#;

        let summary = import_json(json.as_bytes(), &store, RecordRange::between(1, 2)).unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(store.read_at(0).unwrap(), "b||");
        assert_eq!(store.read_at(1).unwrap(), "c||");
    }

    #[test]
    fn test_import_skips_unstorable_entries() {
        let (store, _temp) = create_test_store();
        let json = r#"["fine", "has | pipe", "", "also fine"]"#;

        let summary = import_json(json.as_bytes(), &store, RecordRange::all()).unwrap();
        assert_eq!(summary, ImportSummary { imported: 2, skipped: 2 });
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_import_keeps_entries_verbatim() {
        let (store, _temp) = create_test_store();
        import_json(r#"["  padded quote "]"#.as_bytes(), &store, RecordRange::all()).unwrap();
        assert_eq!(store.read_at(0).unwrap(), "  padded quote ||");
    }

    #[test]
    fn test_import_appends_to_existing() {
        let (store, _temp) = create_test_store();
        store.append(&Quote::body_only("already here")).unwrap();

        import_json(r#"["new"]"#.as_bytes(), &store, RecordRange::all()).unwrap();
        assert_eq!(store.read_at(0).unwrap(), "already here||");
        assert_eq!(store.read_at(1).unwrap(), "new||");
    }

    #[test]
    fn test_import_rejects_non_string_array() {
        let (store, _temp) = create_test_store();
        let result = import_json(r#"{"quotes": []}"#.as_bytes(), &store, RecordRange::all());
        assert!(matches!(result, Err(EwitError::Json(_))));
    }
}
