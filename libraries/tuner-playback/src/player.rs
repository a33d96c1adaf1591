//! Media-playback collaborator interface
//!
//! Abstracts the platform media element (a browser `<audio>` element, a
//! native pipeline). The engine decides *what* to load and *when* to
//! advance; decoding and output are entirely behind this trait.

use std::time::Duration;

/// Platform media element
///
/// Commands are fire-and-forget: the engine never blocks on them, and a new
/// `load` supersedes one still resolving (last command wins). Outcomes come
/// back as events the platform feeds into the coordinator (`on_ended`,
/// `on_play`, `on_pause`, ...).
pub trait MediaPlayer: Send {
    /// Point the element at a new stream and begin loading
    fn load(&mut self, url: &str);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Seek to a position from the start of the track
    fn seek(&mut self, position: Duration);

    /// Set the output volume as a linear ratio (0.0-1.0)
    fn set_volume(&mut self, ratio: f32);

    /// Mute or unmute without touching the volume
    fn set_muted(&mut self, muted: bool);

    /// Elapsed playback time of the loaded track
    fn position(&self) -> Duration;

    /// Total duration of the loaded track, once metadata has loaded
    fn duration(&self) -> Option<Duration>;

    /// Whether the element is currently paused (or has nothing loaded)
    fn is_paused(&self) -> bool;
}

/// Recording media element for tests
///
/// Captures the command stream so tests can assert on exactly what the
/// engine told the platform to do. Clones share state: box one clone into
/// the coordinator and keep the other for assertions.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct MediaProbe {
    inner: std::sync::Arc<std::sync::Mutex<ProbeState>>,
}

#[cfg(test)]
#[derive(Default)]
struct ProbeState {
    commands: Vec<String>,
    position: Duration,
    duration: Option<Duration>,
    paused: bool,
}

#[cfg(test)]
impl MediaProbe {
    pub fn new() -> Self {
        let probe = Self::default();
        probe.inner.lock().unwrap().paused = true;
        probe
    }

    /// Commands issued so far, oldest first
    pub fn commands(&self) -> Vec<String> {
        self.inner.lock().unwrap().commands.clone()
    }

    /// Drop the recorded commands (e.g. to skip constructor volume setup)
    pub fn clear_commands(&self) {
        self.inner.lock().unwrap().commands.clear();
    }

    /// Simulate elapsed playback time
    pub fn set_position(&self, position: Duration) {
        self.inner.lock().unwrap().position = position;
    }

    /// Simulate loaded metadata
    pub fn set_duration(&self, duration: Duration) {
        self.inner.lock().unwrap().duration = Some(duration);
    }
}

#[cfg(test)]
impl MediaPlayer for MediaProbe {
    fn load(&mut self, url: &str) {
        let mut state = self.inner.lock().unwrap();
        state.commands.push(format!("load {url}"));
        state.position = Duration::ZERO;
    }

    fn play(&mut self) {
        let mut state = self.inner.lock().unwrap();
        state.commands.push("play".to_string());
        state.paused = false;
    }

    fn pause(&mut self) {
        let mut state = self.inner.lock().unwrap();
        state.commands.push("pause".to_string());
        state.paused = true;
    }

    fn seek(&mut self, position: Duration) {
        let mut state = self.inner.lock().unwrap();
        state.commands.push(format!("seek {}", position.as_secs()));
        state.position = position;
    }

    fn set_volume(&mut self, ratio: f32) {
        self.inner
            .lock()
            .unwrap()
            .commands
            .push(format!("volume {ratio:.2}"));
    }

    fn set_muted(&mut self, muted: bool) {
        self.inner
            .lock()
            .unwrap()
            .commands
            .push(format!("muted {muted}"));
    }

    fn position(&self) -> Duration {
        self.inner.lock().unwrap().position
    }

    fn duration(&self) -> Option<Duration> {
        self.inner.lock().unwrap().duration
    }

    fn is_paused(&self) -> bool {
        self.inner.lock().unwrap().paused
    }
}
