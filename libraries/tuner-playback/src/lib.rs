//! Tuner - Playback Engine
//!
//! Platform-agnostic playback queue and shuffle/repeat engine for Tuner.
//!
//! This crate provides:
//! - An ordered track queue with ambient vs. explicit modes
//! - A now-playing cursor that stays consistent through every mutation
//! - An independent shuffle permutation with re-pinning on queue changes
//! - Repeat modes (Off, All, One)
//! - Volume control with mute
//! - Typed notifications for UI attachments
//! - Preference persistence (volume, shuffle, repeat)
//!
//! # Architecture
//!
//! `tuner-playback` is completely platform-agnostic: audio output lives
//! behind the [`MediaPlayer`] trait and durable preferences behind
//! [`PreferenceStore`]. The engine decides *what* should be loaded and
//! *when* to advance; it never touches audio data. A [`PlayerSession`]
//! holds the one coordinator for the whole browsing session so queue state
//! survives UI teardown and rebuild.
//!
//! Every control is total: malformed input (empty queue, out-of-range
//! index, removing the playing track) degrades to a no-op, never an error.
//!
//! # Example
//!
//! ```rust
//! use tuner_playback::{MediaPlayer, MemoryPreferences, PlayerSession, Track};
//! use std::time::Duration;
//!
//! // Platform media element (a real one wraps an <audio> element)
//! struct SilentPlayer;
//!
//! impl MediaPlayer for SilentPlayer {
//!     fn load(&mut self, _url: &str) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position: Duration) {}
//!     fn set_volume(&mut self, _ratio: f32) {}
//!     fn set_muted(&mut self, _muted: bool) {}
//!     fn position(&self) -> Duration { Duration::ZERO }
//!     fn duration(&self) -> Option<Duration> { None }
//!     fn is_paused(&self) -> bool { true }
//! }
//!
//! let session = PlayerSession::new(
//!     Box::new(SilentPlayer),
//!     Box::new(MemoryPreferences::new()),
//! );
//!
//! session.play_next(vec![
//!     Track::new("1", "First", "Artist", "/stream/1", "/art/1"),
//!     Track::new("2", "Second", "Artist", "/stream/2", "/art/2"),
//! ]);
//!
//! // The media element ends the first track; the engine advances
//! session.on_ended();
//! assert_eq!(session.current_track().unwrap().id, "2");
//!
//! // Hand the drained events to whatever UI is currently attached
//! for event in session.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

mod coordinator;
mod error;
mod events;
mod player;
mod queue;
mod session;
mod settings;
pub mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use coordinator::{PlaybackCoordinator, StallPolicy};
pub use error::{PreferenceError, Result};
pub use events::PlayerEvent;
pub use player::MediaPlayer;
pub use queue::{MediaDirective, QueueStore};
pub use session::PlayerSession;
pub use settings::{
    load_config, MemoryPreferences, PreferenceStore, PREF_REPEAT, PREF_SHUFFLE, PREF_VOLUME,
};
pub use types::{PlaybackConfig, RepeatMode, Track};
pub use volume::Volume;
