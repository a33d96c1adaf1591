//! Preference persistence
//!
//! Volume and shuffle/repeat preferences survive the session through a
//! durable key-value collaborator, written through on change and read back
//! as initial values on the next session start. Values are JSON under fixed
//! string keys; the backing store (browser local storage, a settings table)
//! lives outside this crate.

use crate::error::Result;
use crate::types::{PlaybackConfig, RepeatMode};
use std::collections::HashMap;

// Preference key constants
/// Volume level (0-100)
pub const PREF_VOLUME: &str = "audio.volume";

/// Shuffle enabled (bool)
pub const PREF_SHUFFLE: &str = "playback.shuffle";

/// Repeat mode ("off" | "all" | "one")
pub const PREF_REPEAT: &str = "playback.repeat";

/// Durable key-value collaborator
pub trait PreferenceStore: Send {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()>;
}

/// Build the initial playback configuration from stored preferences
///
/// Missing or malformed entries fall back to defaults; a store read failure
/// yields the full default configuration rather than surfacing an error at
/// session start.
pub fn load_config(store: &dyn PreferenceStore) -> PlaybackConfig {
    let defaults = PlaybackConfig::default();

    let volume = match store.get(PREF_VOLUME) {
        Ok(Some(value)) => value
            .as_u64()
            .map_or(defaults.volume, |v| u8::try_from(v.min(100)).unwrap_or(100)),
        Ok(None) => defaults.volume,
        Err(err) => {
            tracing::warn!(%err, "failed to read volume preference");
            defaults.volume
        }
    };

    let shuffle = match store.get(PREF_SHUFFLE) {
        Ok(Some(value)) => value.as_bool().unwrap_or(defaults.shuffle),
        Ok(None) => defaults.shuffle,
        Err(err) => {
            tracing::warn!(%err, "failed to read shuffle preference");
            defaults.shuffle
        }
    };

    let repeat = match store.get(PREF_REPEAT) {
        Ok(Some(value)) => value
            .as_str()
            .and_then(RepeatMode::from_str)
            .unwrap_or(defaults.repeat),
        Ok(None) => defaults.repeat,
        Err(err) => {
            tracing::warn!(%err, "failed to read repeat preference");
            defaults.repeat
        }
    };

    PlaybackConfig {
        volume,
        shuffle,
        repeat,
    }
}

/// In-memory preference store
///
/// Backs tests and sessions with no durable storage available; preferences
/// then simply reset on the next session.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, serde_json::Value>,
}

impl MemoryPreferences {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store double that fails every operation, for exercising the
/// degrade-gracefully paths
#[cfg(test)]
pub(crate) struct FailingPreferences;

#[cfg(test)]
impl PreferenceStore for FailingPreferences {
    fn get(&self, _key: &str) -> Result<Option<serde_json::Value>> {
        Err(crate::error::PreferenceError::Storage(
            "store offline".to_string(),
        ))
    }

    fn set(&mut self, _key: &str, _value: serde_json::Value) -> Result<()> {
        Err(crate::error::PreferenceError::Storage(
            "store offline".to_string(),
        ))
    }
}
