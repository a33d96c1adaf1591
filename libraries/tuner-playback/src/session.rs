//! Session-lifetime player handle
//!
//! The engine's state must outlive any single UI attachment: the
//! surrounding application tears its views down and rebuilds them on every
//! navigation. One `PlayerSession` is created by the composition root when
//! playback is first needed and handed to attachments, which read and write
//! through it and drain its events rather than owning any player state.

use crate::coordinator::{PlaybackCoordinator, StallPolicy};
use crate::events::PlayerEvent;
use crate::player::MediaPlayer;
use crate::settings::PreferenceStore;
use crate::types::{RepeatMode, Track};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Cloneable handle to the session's one playback coordinator
#[derive(Clone)]
pub struct PlayerSession {
    inner: Arc<Mutex<PlaybackCoordinator>>,
}

impl PlayerSession {
    /// Create the session's coordinator over the injected collaborators
    pub fn new(media: Box<dyn MediaPlayer>, prefs: Box<dyn PreferenceStore>) -> Self {
        tracing::debug!("creating playback session");
        Self {
            inner: Arc::new(Mutex::new(PlaybackCoordinator::new(media, prefs))),
        }
    }

    /// Lock the coordinator
    ///
    /// Mutations are synchronous and single-threaded by contract, so a
    /// poisoned lock cannot expose a half-applied mutation; recover the
    /// inner value instead of failing the control.
    fn coordinator(&self) -> MutexGuard<'_, PlaybackCoordinator> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Queue Commands =====

    /// Play one track from a row click
    pub fn play_single(&self, track: Track) {
        self.coordinator().play_single(track);
    }

    /// Insert tracks right after the current one ("play next")
    pub fn play_next(&self, tracks: Vec<Track>) {
        self.coordinator().play_next(tracks);
    }

    /// Append tracks at the end of the queue ("add to queue")
    pub fn add_to_queue(&self, tracks: Vec<Track>) {
        self.coordinator().add_to_queue(tracks);
    }

    /// Replace the queue with a listing and start at `start_index`
    pub fn play_all(&self, tracks: Vec<Track>, start_index: usize) {
        self.coordinator().play_all(tracks, start_index);
    }

    /// Remove the track at `index` (never the playing one)
    pub fn remove_from_queue(&self, index: usize) {
        self.coordinator().remove_from_queue(index);
    }

    /// Move one track from `old_index` to `new_index`
    pub fn reorder_queue(&self, old_index: usize, new_index: usize) {
        self.coordinator().reorder_queue(old_index, new_index);
    }

    /// Reset to the empty, idle state and stop the media element
    pub fn clear_queue(&self) {
        self.coordinator().clear_queue();
    }

    // ===== Transport Commands =====

    /// Skip to the next track in playback order
    pub fn next(&self) {
        self.coordinator().next();
    }

    /// Step back, or restart the current track past three seconds in
    pub fn previous(&self) {
        self.coordinator().previous();
    }

    /// Toggle play/pause on the media element
    pub fn toggle_play(&self) {
        self.coordinator().toggle_play();
    }

    /// Seek to an absolute position in the loaded track
    pub fn seek_to(&self, position: Duration) {
        self.coordinator().seek_to(position);
    }

    /// Seek relative to the current position, clamped to the track bounds
    pub fn seek_by(&self, delta_secs: i64) {
        self.coordinator().seek_by(delta_secs);
    }

    // ===== Shuffle / Repeat / Volume Commands =====

    /// Flip shuffle and persist the preference
    pub fn toggle_shuffle(&self) {
        self.coordinator().toggle_shuffle();
    }

    /// Advance the repeat mode and persist the preference
    pub fn cycle_repeat(&self) {
        self.coordinator().cycle_repeat();
    }

    /// Set the volume level (0-100) and persist it
    pub fn set_volume(&self, level: u8) {
        self.coordinator().set_volume(level);
    }

    /// Toggle mute without touching the level
    pub fn toggle_mute(&self) {
        self.coordinator().toggle_mute();
    }

    /// Choose the behavior for media load/decode errors
    pub fn set_stall_policy(&self, policy: StallPolicy) {
        self.coordinator().set_stall_policy(policy);
    }

    // ===== Media Events =====

    /// The loaded track played to its natural end
    pub fn on_ended(&self) {
        self.coordinator().on_ended();
    }

    /// The media element started playing
    pub fn on_play(&self) {
        self.coordinator().on_play();
    }

    /// The media element paused
    pub fn on_pause(&self) {
        self.coordinator().on_pause();
    }

    /// Periodic progress tick from the media element
    pub fn on_time_update(&self) {
        self.coordinator().on_time_update();
    }

    /// Track metadata finished loading
    pub fn on_loaded_metadata(&self) {
        self.coordinator().on_loaded_metadata();
    }

    /// The media element reported a load/decode failure
    pub fn on_media_error(&self) {
        self.coordinator().on_media_error();
    }

    // ===== Notifications and State =====

    /// Take all pending events, oldest first
    pub fn drain_events(&self) -> Vec<PlayerEvent> {
        self.coordinator().drain_events()
    }

    /// Check if any events are waiting
    pub fn has_pending_events(&self) -> bool {
        self.coordinator().has_pending_events()
    }

    /// Full queue in stored order with the cursor, for a queue list view
    pub fn queue_snapshot(&self) -> (Vec<Track>, Option<usize>) {
        let coordinator = self.coordinator();
        (coordinator.queue().to_vec(), coordinator.current_index())
    }

    /// The now-playing track, if any
    pub fn current_track(&self) -> Option<Track> {
        self.coordinator().current_track().cloned()
    }

    /// Whether the queue was user-assembled
    pub fn is_explicit_queue(&self) -> bool {
        self.coordinator().is_explicit_queue()
    }

    /// Whether shuffle is enabled
    pub fn shuffle_enabled(&self) -> bool {
        self.coordinator().shuffle_enabled()
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.coordinator().repeat()
    }

    /// Current volume level (0-100)
    pub fn volume_level(&self) -> u8 {
        self.coordinator().volume_level()
    }

    /// Whether audio is muted
    pub fn is_muted(&self) -> bool {
        self.coordinator().is_muted()
    }
}
