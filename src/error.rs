//! Error types for EWit
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in EWit
#[derive(Debug, Error)]
pub enum EwitError {
    /// Requested ordinal is outside the stored records
    #[error("No quote at #{index} (store holds {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// Registration input could not be turned into a storable quote
    #[error("Malformed registration: {0}")]
    MalformedRegistration(String),

    /// Bulk export exceeds the transfer cap
    #[error("Export too large: {size} bytes exceeds limit of {limit} bytes")]
    ExportTooLarge { size: u64, limit: u64 },

    /// Random fetch on a store with no user quotes
    #[error("Store holds no quotes")]
    EmptyStore,

    /// A stored line could not be split into quote fields
    #[error("Corrupt record: {0:?}")]
    CorruptRecord(String),

    /// Listing range could not be parsed or is inverted
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Command argument not understood
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for EWit operations
pub type Result<T> = std::result::Result<T, EwitError>;
