//! Queue store
//!
//! The single owner of the playback queue, the now-playing cursor, the
//! ambient/explicit mode flag, the shuffle permutation, and the repeat mode.
//! Every mutation runs synchronously to completion and keeps all of these
//! mutually consistent; malformed input degrades to a no-op, never an error.
//!
//! Invariants:
//! - `current.is_none()` exactly when the queue is empty
//! - while shuffle is enabled, `order` is a permutation of the live index
//!   range and `order[position] == current` whenever a track is loaded

use crate::shuffle;
use crate::types::{RepeatMode, Track};
use std::time::Duration;

/// Elapsed playback beyond which "previous" restarts the current track
/// instead of stepping back
const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// What the coordinator must do to the media element after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaDirective {
    /// Nothing to do; the loaded track is unaffected
    None,

    /// Load this track and start playback
    LoadAndPlay(Track),

    /// Seek the loaded track to zero and play
    RestartCurrent,

    /// Stop playback and drop the loaded track
    Unload,
}

/// Position in the shuffle permutation
///
/// Exists only while shuffle is enabled. `order` spans the whole queue and
/// is redrawn on every queue-topology change.
#[derive(Debug, Clone)]
struct ShuffleCursor {
    order: Vec<usize>,
    position: usize,
}

/// Ordered track queue with its playback cursor
///
/// Insertion order is the playback order when shuffle is off. The same
/// track id may appear at several positions; all indexing is positional.
#[derive(Debug, Clone)]
pub struct QueueStore {
    tracks: Vec<Track>,
    current: Option<usize>,
    explicit: bool,
    repeat: RepeatMode,
    shuffle: Option<ShuffleCursor>,
}

impl QueueStore {
    /// Create an empty store with restored shuffle/repeat preferences
    pub fn new(shuffle_enabled: bool, repeat: RepeatMode) -> Self {
        Self {
            tracks: Vec::new(),
            current: None,
            explicit: false,
            repeat,
            shuffle: shuffle_enabled.then(|| ShuffleCursor {
                order: Vec::new(),
                position: 0,
            }),
        }
    }

    // ===== Queue Mutation =====

    /// Play one track from a row click
    ///
    /// Ambient mode replaces the queue wholesale; with an explicit queue the
    /// track is inserted right after the current one and becomes current.
    pub fn play_single(&mut self, track: Track) -> MediaDirective {
        if self.explicit && !self.tracks.is_empty() {
            let at = self.current.map_or(0, |c| c + 1);
            self.tracks.insert(at, track.clone());
            self.current = Some(at);
            self.redraw_shuffle(false);
        } else {
            self.tracks = vec![track.clone()];
            self.current = Some(0);
            self.redraw_shuffle(true);
        }
        MediaDirective::LoadAndPlay(track)
    }

    /// Insert tracks right after the current one ("play next")
    ///
    /// Marks the queue explicit. Starts playback only when the queue was
    /// empty; otherwise the current track keeps playing in place.
    pub fn play_next(&mut self, tracks: Vec<Track>) -> MediaDirective {
        if tracks.is_empty() {
            return MediaDirective::None;
        }
        self.explicit = true;
        if self.tracks.is_empty() {
            self.tracks = tracks;
            self.current = Some(0);
            self.redraw_shuffle(true);
            MediaDirective::LoadAndPlay(self.tracks[0].clone())
        } else {
            let at = self.current.map_or(0, |c| c + 1);
            self.tracks.splice(at..at, tracks);
            self.redraw_shuffle(false);
            MediaDirective::None
        }
    }

    /// Append tracks at the end of the queue ("add to queue")
    pub fn add_to_queue(&mut self, tracks: Vec<Track>) -> MediaDirective {
        if tracks.is_empty() {
            return MediaDirective::None;
        }
        self.explicit = true;
        if self.tracks.is_empty() {
            self.tracks = tracks;
            self.current = Some(0);
            self.redraw_shuffle(true);
            MediaDirective::LoadAndPlay(self.tracks[0].clone())
        } else {
            self.tracks.extend(tracks);
            self.redraw_shuffle(false);
            MediaDirective::None
        }
    }

    /// Replace the queue with a whole listing and start at `start_index`
    /// ("play all" / clicking row N of a list)
    pub fn play_all(&mut self, tracks: Vec<Track>, start_index: usize) -> MediaDirective {
        if tracks.is_empty() || start_index >= tracks.len() {
            return MediaDirective::None;
        }
        self.explicit = true;
        self.tracks = tracks;
        self.current = Some(start_index);
        self.redraw_shuffle(true);
        MediaDirective::LoadAndPlay(self.tracks[start_index].clone())
    }

    /// Remove the track at `index`
    ///
    /// The currently playing track may never be removed here; callers
    /// needing that must clear the queue or advance first. Returns the
    /// removed track, or `None` when nothing changed.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() || Some(index) == self.current {
            return None;
        }
        let removed = self.tracks.remove(index);
        if let Some(c) = self.current {
            if index < c {
                self.current = Some(c - 1);
            }
        }
        self.redraw_shuffle(false);
        Some(removed)
    }

    /// Move one track from `old_index` to `new_index`
    ///
    /// Standard splice-move. The cursor follows the moved track when it is
    /// the current one, and shifts by one when the move crosses it. Returns
    /// whether anything changed.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) -> bool {
        let len = self.tracks.len();
        if old_index >= len || new_index >= len || old_index == new_index {
            return false;
        }
        let track = self.tracks.remove(old_index);
        self.tracks.insert(new_index, track);

        if let Some(c) = self.current {
            self.current = Some(if old_index == c {
                new_index
            } else if old_index < c && new_index >= c {
                c - 1
            } else if old_index > c && new_index <= c {
                c + 1
            } else {
                c
            });
        }
        self.redraw_shuffle(false);
        true
    }

    /// Reset to the empty, idle state
    ///
    /// Drops the queue and cursor and returns to ambient mode. The shuffle
    /// *enabled* flag survives (it is a persisted preference); the order it
    /// spanned does not.
    pub fn clear(&mut self) -> MediaDirective {
        self.tracks.clear();
        self.current = None;
        self.explicit = false;
        if let Some(cursor) = &mut self.shuffle {
            cursor.order.clear();
            cursor.position = 0;
        }
        MediaDirective::Unload
    }

    // ===== Navigation =====

    /// Step to the next track in playback order
    ///
    /// At the end of the pass, repeat-all wraps (shuffle off) or starts a
    /// fresh permutation (shuffle on); otherwise the cursor stays on the
    /// last track and playback stops.
    pub fn advance(&mut self) -> MediaDirective {
        if self.tracks.is_empty() {
            return MediaDirective::None;
        }
        let len = self.tracks.len();
        let next = match self.shuffle.as_mut() {
            Some(cursor) => {
                if cursor.position + 1 < cursor.order.len() {
                    cursor.position += 1;
                    Some(cursor.order[cursor.position])
                } else if self.repeat == RepeatMode::All {
                    cursor.order = shuffle::generate(len);
                    cursor.position = 0;
                    cursor.order.first().copied()
                } else {
                    None
                }
            }
            None => match self.current {
                Some(c) if c + 1 < len => Some(c + 1),
                Some(_) if self.repeat == RepeatMode::All => Some(0),
                _ => None,
            },
        };
        match next {
            Some(index) => {
                self.current = Some(index);
                MediaDirective::LoadAndPlay(self.tracks[index].clone())
            }
            None => MediaDirective::None,
        }
    }

    /// Step to the previous track in playback order
    ///
    /// More than three seconds in, "previous" restarts the current track
    /// instead of changing tracks. At the first playback position it also
    /// restarts rather than wrapping.
    pub fn retreat(&mut self, elapsed: Duration) -> MediaDirective {
        if self.tracks.is_empty() {
            return MediaDirective::None;
        }
        if elapsed > RESTART_THRESHOLD {
            return MediaDirective::RestartCurrent;
        }
        let prev = match self.shuffle.as_mut() {
            Some(cursor) => {
                if cursor.position > 0 && !cursor.order.is_empty() {
                    cursor.position -= 1;
                    Some(cursor.order[cursor.position])
                } else {
                    None
                }
            }
            None => match self.current {
                Some(c) if c > 0 => Some(c - 1),
                _ => None,
            },
        };
        match prev {
            Some(index) => {
                self.current = Some(index);
                MediaDirective::LoadAndPlay(self.tracks[index].clone())
            }
            None => MediaDirective::RestartCurrent,
        }
    }

    /// Natural end of the loaded track
    ///
    /// Repeat-one restarts in place without consuming a shuffle or queue
    /// step; every other mode behaves exactly like `advance`.
    pub fn on_track_ended(&mut self) -> MediaDirective {
        if self.repeat == RepeatMode::One && self.current.is_some() {
            MediaDirective::RestartCurrent
        } else {
            self.advance()
        }
    }

    // ===== Shuffle / Repeat =====

    /// Flip shuffle on or off; returns the new state
    ///
    /// Enabling pins the current index to the front of a fresh permutation
    /// so the listener hears no jump. Disabling discards the permutation
    /// and navigation falls back to queue order.
    pub fn toggle_shuffle(&mut self) -> bool {
        if self.shuffle.take().is_some() {
            false
        } else {
            let mut order = shuffle::generate(self.tracks.len());
            if let Some(current) = self.current {
                shuffle::pin(&mut order, 0, current);
            }
            self.shuffle = Some(ShuffleCursor { order, position: 0 });
            true
        }
    }

    /// Advance the repeat mode (off -> all -> one -> off); returns the new mode
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        self.repeat
    }

    // ===== Accessors =====

    /// All queued tracks in stored (non-shuffled) order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index of the now-playing track, if any
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The now-playing track, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|c| self.tracks.get(c))
    }

    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether the queue was user-assembled (play-next / add-to-queue /
    /// play-all) rather than ambient single-row playback
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Whether shuffle is enabled
    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle.is_some()
    }

    /// The live shuffle permutation, when shuffle is enabled
    pub fn shuffle_order(&self) -> Option<&[usize]> {
        self.shuffle.as_ref().map(|cursor| cursor.order.as_slice())
    }

    /// Position within the shuffle permutation, when shuffle is enabled
    pub fn shuffle_position(&self) -> Option<usize> {
        self.shuffle.as_ref().map(|cursor| cursor.position)
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    // ===== Internal =====

    /// Redraw the shuffle permutation after a queue mutation
    ///
    /// A fresh Fisher-Yates draw over the new index range, with the current
    /// index re-pinned at the shuffle position so the mutation never changes
    /// what plays next. Wholesale queue loads restart the pass at the front.
    fn redraw_shuffle(&mut self, restart_pass: bool) {
        let len = self.tracks.len();
        if let Some(cursor) = &mut self.shuffle {
            cursor.order = shuffle::generate(len);
            cursor.position = if restart_pass {
                0
            } else {
                cursor.position.min(len.saturating_sub(1))
            };
            if let Some(current) = self.current {
                shuffle::pin(&mut cursor.order, cursor.position, current);
            }
        }
    }
}

impl Default for QueueStore {
    fn default() -> Self {
        Self::new(false, RepeatMode::Off)
    }
}
