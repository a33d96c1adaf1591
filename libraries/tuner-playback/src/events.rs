//! Player notifications
//!
//! Typed events for UI synchronization. The coordinator accumulates them in
//! a pending buffer; attachments drain the buffer and render, replacing the
//! one-writer-many-readers shape of a document-level event bus with an
//! explicit interface.

use crate::types::Track;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Queue contents or cursor changed (for a queue list view)
    QueueChanged {
        /// Full queue in stored order
        queue: Vec<Track>,
        /// Index of the now-playing track, if any
        current_index: Option<usize>,
    },

    /// A different track was loaded (for the mini-player and row highlight)
    NowPlayingChanged {
        /// Track title
        title: String,
        /// Artist name
        artist: String,
        /// Album artwork locator
        album_art_url: String,
    },

    /// Plain announcement string for assistive technology
    Announcement {
        /// e.g. "Now playing: <title> by <artist>"
        message: String,
    },

    /// The media element started or stopped playing (for the play/pause icon)
    StateChanged {
        /// Whether audio is currently playing
        playing: bool,
    },

    /// Periodic playback progress (for the progress bar)
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration
        duration_ms: u64,
    },

    /// Track metadata finished loading (for the duration display)
    MetadataLoaded {
        /// Total track duration
        duration_ms: u64,
    },

    /// Volume or mute state changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        muted: bool,
    },
}
