//! Core types for the playback engine

use serde::{Deserialize, Serialize};

/// One playable item in the queue
///
/// Immutable once constructed. The stream URL is a locator the media
/// collaborator resolves to bytes; this engine never touches audio data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Stable opaque identifier from the library
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Locator for the audio stream
    pub stream_url: String,

    /// Locator for the album artwork
    pub album_art_url: String,
}

impl Track {
    /// Create a new track record
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        stream_url: impl Into<String>,
        album_art_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            stream_url: stream_url.into(),
            album_art_url: album_art_url.into(),
        }
    }
}

/// Equality is by identity, not metadata
///
/// The same track id may appear at several queue positions; position, not
/// id, decides which instance is playing.
impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

/// Repeat mode
///
/// Affects only track completion and queue exhaustion, never manual
/// mid-queue navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the queue ends
    #[default]
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// Next mode in the cycle: off -> all -> one -> off
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Self::Off),
            "all" => Some(Self::All),
            "one" => Some(Self::One),
            _ => None,
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Initial state restored from the preference store at session start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 100)
    pub volume: u8,

    /// Initial shuffle state (default: off)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 100,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 100);
        assert!(!config.shuffle);
        assert_eq!(config.repeat, RepeatMode::Off);
    }

    #[test]
    fn repeat_cycle_returns_to_start() {
        let mode = RepeatMode::Off;
        assert_eq!(mode.cycle(), RepeatMode::All);
        assert_eq!(mode.cycle().cycle(), RepeatMode::One);
        assert_eq!(mode.cycle().cycle().cycle(), RepeatMode::Off);
    }

    #[test]
    fn repeat_mode_string_round_trip() {
        for mode in [RepeatMode::Off, RepeatMode::All, RepeatMode::One] {
            assert_eq!(RepeatMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(RepeatMode::from_str("bogus"), None);
    }

    #[test]
    fn track_equality_is_by_id() {
        let a = Track::new("7", "Title A", "Artist A", "/stream/7", "/art/7");
        let b = Track::new("7", "Retagged", "Someone Else", "/stream/7b", "/art/7b");
        let c = Track::new("8", "Title A", "Artist A", "/stream/7", "/art/7");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
