//! Error types for the playback engine
//!
//! Playback controls themselves never fail: every malformed input (empty
//! queue, out-of-range index, removing the active track) is a defined no-op.
//! The only fallible boundary is the durable preference store.

use thiserror::Error;

/// Preference store errors
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Underlying storage failed
    #[error("preference storage error: {0}")]
    Storage(String),

    /// Stored value could not be serialized or deserialized
    #[error("preference serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for preference operations
pub type Result<T> = std::result::Result<T, PreferenceError>;
