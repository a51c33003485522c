//! Error types for the card-store crate.

use thiserror::Error;

/// Errors that can occur while reading or writing durable card state.
///
/// Callers in the pipeline never surface these to the user: a failed read is
/// treated as "nothing persisted" and a failed write is logged and dropped.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value (or the backing file) is not valid JSON of the expected shape
    #[error("Malformed JSON under {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the value would exceed the configured storage quota
    #[error("Quota exceeded writing {key}: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// Storage has been switched off (e.g. private browsing, policy)
    #[error("Storage is unavailable")]
    Unavailable,

    /// Internal lock was poisoned by a panicking writer
    #[error("Storage lock poisoned: {0}")]
    Poisoned(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
