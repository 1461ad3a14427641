//! Background music for the current mode.
//!
//! The controller owns at most one loaded track. A mode change unloads and
//! reloads, a mute change only updates the loaded track. Load failures stop
//! here: they are logged and the session carries on in silence.

pub mod silent;

#[cfg(feature = "rodio")]
pub mod rodio_backend;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::pomodoro::PomodoroMode;

pub use silent::SilentBackend;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio track {} is unavailable: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("audio track {} could not be decoded: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("audio output unavailable: {0}")]
    Device(String),
}

/// Platform playback service.
pub trait AudioBackend {
    /// Load `path` ready to loop, paused. `muted` applies before any sound is produced.
    fn load(&mut self, path: &Path, muted: bool) -> Result<Box<dyn Track>, AudioError>;

    fn name(&self) -> &str;
}

/// One loaded sound resource.
pub trait Track {
    fn play(&mut self);
    fn pause(&mut self);
    fn set_muted(&mut self, muted: bool);
    fn is_playing(&self) -> bool;
    /// Release the resource. Consumes the handle so it cannot be reused.
    fn unload(self: Box<Self>);
}

/// Track file per mode. A missing entry means that mode plays nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tracks {
    pub work: Option<PathBuf>,
    pub break_: Option<PathBuf>,
}

impl Tracks {
    pub fn for_mode(&self, mode: PomodoroMode) -> Option<&Path> {
        match mode {
            PomodoroMode::Work => self.work.as_deref(),
            PomodoroMode::Break => self.break_.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.work.is_none() && self.break_.is_none()
    }
}

struct Loaded {
    mode: PomodoroMode,
    track: Box<dyn Track>,
}

pub struct AudioController {
    backend: Box<dyn AudioBackend>,
    tracks: Tracks,
    muted: bool,
    loaded: Option<Loaded>,
    load_count: u64,
}

impl AudioController {
    pub fn new(backend: Box<dyn AudioBackend>, tracks: Tracks, muted: bool) -> Self {
        info!(backend = backend.name(), muted, "audio controller ready");
        Self {
            backend,
            tracks,
            muted,
            loaded: None,
            load_count: 0,
        }
    }

    /// Replace whatever is loaded with `mode`'s track and start it.
    pub fn load_and_play(&mut self, mode: PomodoroMode, muted: bool) {
        self.teardown();
        self.muted = muted;

        let Some(path) = self.tracks.for_mode(mode) else {
            debug!(%mode, "no track configured");
            return;
        };

        match self.backend.load(path, muted) {
            Ok(mut track) => {
                track.play();
                self.load_count += 1;
                debug!(%mode, path = %path.display(), muted, "track loaded");
                self.loaded = Some(Loaded { mode, track });
            }
            Err(e) => {
                warn!(%mode, error = %e, "failed to load track, continuing without audio");
            }
        }
    }

    /// Continue the loaded track, or load `mode`'s track if nothing matching is loaded.
    pub fn resume(&mut self, mode: PomodoroMode) {
        if self.loaded_mode() != Some(mode) {
            self.load_and_play(mode, self.muted);
        } else if let Some(loaded) = self.loaded.as_mut() {
            loaded.track.play();
        }
    }

    pub fn pause(&mut self) {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.track.pause();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.track.set_muted(muted);
        }
    }

    pub fn teardown(&mut self) {
        if let Some(loaded) = self.loaded.take() {
            debug!(mode = %loaded.mode, "track unloaded");
            loaded.track.unload();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.loaded.as_ref().is_some_and(|l| l.track.is_playing())
    }

    pub fn loaded_mode(&self) -> Option<PomodoroMode> {
        self.loaded.as_ref().map(|l| l.mode)
    }

    /// Successful loads so far. Stays put when only mute changes.
    pub fn load_count(&self) -> u64 {
        self.load_count
    }
}

impl Drop for AudioController {
    fn drop(&mut self) {
        self.teardown();
    }
}
