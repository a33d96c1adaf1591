//! Playback coordinator
//!
//! Bridges queue store transitions to the media collaborator and media
//! events back into the store. Owns the volume surface and writes volume
//! and shuffle/repeat preferences through to the durable store. UI
//! attachments drive it with commands and drain its event buffer; it holds
//! no UI state of its own.

use crate::events::PlayerEvent;
use crate::player::MediaPlayer;
use crate::queue::{MediaDirective, QueueStore};
use crate::settings::{self, PreferenceStore, PREF_REPEAT, PREF_SHUFFLE, PREF_VOLUME};
use crate::types::{RepeatMode, Track};
use crate::volume::Volume;
use serde_json::json;
use std::time::Duration;

/// What to do when the media collaborator reports a load/decode error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StallPolicy {
    /// Leave state unchanged; playback stalls until the user acts
    #[default]
    Stall,

    /// Advance to the next track as if the broken one had ended
    SkipToNext,
}

/// Coordinates the queue store, the media element, and UI notifications
pub struct PlaybackCoordinator {
    store: QueueStore,
    media: Box<dyn MediaPlayer>,
    prefs: Box<dyn PreferenceStore>,
    volume: Volume,
    /// Track the media element currently has loaded
    loaded: Option<Track>,
    stall_policy: StallPolicy,
    pending: Vec<PlayerEvent>,
}

impl PlaybackCoordinator {
    /// Create a coordinator with restored preferences applied
    ///
    /// Reads volume and shuffle/repeat from the preference store and pushes
    /// the initial volume to the media element before any track loads.
    pub fn new(media: Box<dyn MediaPlayer>, prefs: Box<dyn PreferenceStore>) -> Self {
        let config = settings::load_config(prefs.as_ref());
        let volume = Volume::new(config.volume);

        let mut media = media;
        media.set_volume(volume.ratio());
        media.set_muted(volume.is_muted());

        Self {
            store: QueueStore::new(config.shuffle, config.repeat),
            media,
            prefs,
            volume,
            loaded: None,
            stall_policy: StallPolicy::default(),
            pending: Vec::new(),
        }
    }

    /// Choose the behavior for media load/decode errors
    pub fn set_stall_policy(&mut self, policy: StallPolicy) {
        self.stall_policy = policy;
    }

    // ===== Queue Commands =====

    /// Play one track from a row click
    pub fn play_single(&mut self, track: Track) {
        let directive = self.store.play_single(track);
        self.apply(directive);
        self.emit_queue_changed();
    }

    /// Insert tracks right after the current one ("play next")
    pub fn play_next(&mut self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }
        let directive = self.store.play_next(tracks);
        self.apply(directive);
        self.emit_queue_changed();
    }

    /// Append tracks at the end of the queue ("add to queue")
    pub fn add_to_queue(&mut self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }
        let directive = self.store.add_to_queue(tracks);
        self.apply(directive);
        self.emit_queue_changed();
    }

    /// Replace the queue with a listing and start at `start_index`
    pub fn play_all(&mut self, tracks: Vec<Track>, start_index: usize) {
        if start_index >= tracks.len() {
            return;
        }
        let directive = self.store.play_all(tracks, start_index);
        self.apply(directive);
        self.emit_queue_changed();
    }

    /// Remove the track at `index` (never the playing one)
    pub fn remove_from_queue(&mut self, index: usize) {
        if self.store.remove(index).is_some() {
            self.emit_queue_changed();
        }
    }

    /// Move one track from `old_index` to `new_index`
    pub fn reorder_queue(&mut self, old_index: usize, new_index: usize) {
        if self.store.reorder(old_index, new_index) {
            self.emit_queue_changed();
        }
    }

    /// Reset to the empty, idle state and stop the media element
    pub fn clear_queue(&mut self) {
        let directive = self.store.clear();
        self.apply(directive);
        self.emit_queue_changed();
    }

    // ===== Transport Commands =====

    /// Skip to the next track in playback order
    pub fn next(&mut self) {
        let directive = self.store.advance();
        let moved = matches!(directive, MediaDirective::LoadAndPlay(_));
        self.apply(directive);
        if moved {
            self.emit_queue_changed();
        }
    }

    /// Step back, or restart the current track past three seconds in
    pub fn previous(&mut self) {
        let directive = self.store.retreat(self.media.position());
        let moved = matches!(directive, MediaDirective::LoadAndPlay(_));
        self.apply(directive);
        if moved {
            self.emit_queue_changed();
        }
    }

    /// Toggle play/pause on the media element
    ///
    /// Does not change which track is active, so it never goes through the
    /// queue store. No-op with nothing loaded.
    pub fn toggle_play(&mut self) {
        if self.loaded.is_none() {
            return;
        }
        if self.media.is_paused() {
            self.media.play();
        } else {
            self.media.pause();
        }
    }

    /// Seek to an absolute position in the loaded track
    pub fn seek_to(&mut self, position: Duration) {
        if self.loaded.is_some() {
            self.media.seek(position);
        }
    }

    /// Seek relative to the current position, clamped to the track bounds
    pub fn seek_by(&mut self, delta_secs: i64) {
        if self.loaded.is_none() {
            return;
        }
        let Some(duration) = self.media.duration() else {
            return;
        };
        let step = Duration::from_secs(delta_secs.unsigned_abs());
        let current = self.media.position();
        let target = if delta_secs >= 0 {
            (current + step).min(duration)
        } else {
            current.saturating_sub(step)
        };
        self.media.seek(target);
    }

    // ===== Shuffle / Repeat Commands =====

    /// Flip shuffle and persist the preference
    pub fn toggle_shuffle(&mut self) {
        let enabled = self.store.toggle_shuffle();
        self.persist(PREF_SHUFFLE, json!(enabled));
    }

    /// Advance the repeat mode and persist the preference
    pub fn cycle_repeat(&mut self) {
        let mode = self.store.cycle_repeat();
        self.persist(PREF_REPEAT, json!(mode.as_str()));
    }

    // ===== Volume Commands =====

    /// Set the volume level (0-100) and persist it
    ///
    /// Moving the slider also unmutes.
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.volume.unmute();
        self.media.set_volume(self.volume.ratio());
        self.media.set_muted(false);
        self.persist(PREF_VOLUME, json!(self.volume.level()));
        self.pending.push(PlayerEvent::VolumeChanged {
            level: self.volume.level(),
            muted: false,
        });
    }

    /// Toggle mute without touching the level
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.media.set_muted(self.volume.is_muted());
        self.pending.push(PlayerEvent::VolumeChanged {
            level: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }

    // ===== Media Events =====

    /// The loaded track played to its natural end
    pub fn on_ended(&mut self) {
        let directive = self.store.on_track_ended();
        let moved = matches!(directive, MediaDirective::LoadAndPlay(_));
        self.apply(directive);
        if moved {
            self.emit_queue_changed();
        }
    }

    /// The media element started playing
    pub fn on_play(&mut self) {
        self.pending.push(PlayerEvent::StateChanged { playing: true });
    }

    /// The media element paused
    pub fn on_pause(&mut self) {
        self.pending.push(PlayerEvent::StateChanged { playing: false });
    }

    /// Periodic progress tick from the media element
    pub fn on_time_update(&mut self) {
        let Some(duration) = self.media.duration() else {
            return;
        };
        self.pending.push(PlayerEvent::PositionUpdate {
            position_ms: millis(self.media.position()),
            duration_ms: millis(duration),
        });
    }

    /// Track metadata finished loading
    pub fn on_loaded_metadata(&mut self) {
        if let Some(duration) = self.media.duration() {
            self.pending.push(PlayerEvent::MetadataLoaded {
                duration_ms: millis(duration),
            });
        }
    }

    /// The media element reported a load/decode failure
    pub fn on_media_error(&mut self) {
        match self.stall_policy {
            StallPolicy::Stall => {
                tracing::warn!("media error reported; playback stalled");
            }
            StallPolicy::SkipToNext => {
                tracing::warn!("media error reported; skipping to next track");
                self.next();
            }
        }
    }

    // ===== Notifications =====

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Check if any events are waiting
    pub fn has_pending_events(&self) -> bool {
        !self.pending.is_empty()
    }

    // ===== State Queries =====

    /// All queued tracks in stored order
    pub fn queue(&self) -> &[Track] {
        self.store.tracks()
    }

    /// Index of the now-playing track, if any
    pub fn current_index(&self) -> Option<usize> {
        self.store.current_index()
    }

    /// The now-playing track, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.store.current_track()
    }

    /// Whether the queue was user-assembled
    pub fn is_explicit_queue(&self) -> bool {
        self.store.is_explicit()
    }

    /// Whether shuffle is enabled
    pub fn shuffle_enabled(&self) -> bool {
        self.store.shuffle_enabled()
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.store.repeat()
    }

    /// Current volume level (0-100)
    pub fn volume_level(&self) -> u8 {
        self.volume.level()
    }

    /// Whether audio is muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    // ===== Internal =====

    /// Execute a queue store directive against the media element
    ///
    /// Directives run unconditionally: the store emits `LoadAndPlay` only on
    /// a genuine transition, and re-loading an already-loaded URL restarts
    /// it from the top (replaying a single-track queue relies on this).
    fn apply(&mut self, directive: MediaDirective) {
        match directive {
            MediaDirective::None => {}
            MediaDirective::LoadAndPlay(track) => {
                tracing::debug!(track = %track.id, "loading track");
                self.media.load(&track.stream_url);
                self.media.play();
                self.pending.push(PlayerEvent::NowPlayingChanged {
                    title: track.title.clone(),
                    artist: track.artist.clone(),
                    album_art_url: track.album_art_url.clone(),
                });
                self.pending.push(PlayerEvent::Announcement {
                    message: format!("Now playing: {} by {}", track.title, track.artist),
                });
                self.loaded = Some(track);
            }
            MediaDirective::RestartCurrent => {
                if self.loaded.is_some() {
                    self.media.seek(Duration::ZERO);
                    self.media.play();
                }
            }
            MediaDirective::Unload => {
                self.media.pause();
                self.loaded = None;
            }
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending.push(PlayerEvent::QueueChanged {
            queue: self.store.tracks().to_vec(),
            current_index: self.store.current_index(),
        });
    }

    /// Write a preference through, staying inert on failure
    fn persist(&mut self, key: &str, value: serde_json::Value) {
        if let Err(err) = self.prefs.set(key, value) {
            tracing::warn!(key, %err, "failed to persist preference");
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
