use std::path::{Path, PathBuf};

use tracing::trace;

use super::{AudioBackend, AudioError, Track};

/// Backend that accepts every track and produces no sound.
///
/// Used when no tracks are configured or the output device cannot be opened,
/// so the rest of the session behaves the same either way.
#[derive(Debug, Default)]
pub struct SilentBackend {
    loads: u64,
}

#[derive(Debug)]
pub struct SilentTrack {
    id: u64,
    path: PathBuf,
    playing: bool,
    muted: bool,
}

impl AudioBackend for SilentBackend {
    fn load(&mut self, path: &Path, muted: bool) -> Result<Box<dyn Track>, AudioError> {
        self.loads += 1;
        trace!(id = self.loads, path = %path.display(), "silent track loaded");
        Ok(Box::new(SilentTrack {
            id: self.loads,
            path: path.to_path_buf(),
            playing: false,
            muted,
        }))
    }

    fn name(&self) -> &str {
        "silent"
    }
}

impl Track for SilentTrack {
    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_muted(&mut self, muted: bool) {
        trace!(id = self.id, muted, "silent track mute");
        self.muted = muted;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn unload(self: Box<Self>) {
        trace!(id = self.id, path = %self.path.display(), muted = self.muted, "silent track unloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_get_fresh_ids() {
        let mut backend = SilentBackend::default();
        backend.load(Path::new("a.mp3"), false).unwrap().unload();
        backend.load(Path::new("b.mp3"), true).unwrap().unload();
        assert_eq!(backend.loads, 2);
    }

    #[test]
    fn test_play_pause() {
        let mut backend = SilentBackend::default();
        let mut track = backend.load(Path::new("a.mp3"), false).unwrap();
        assert!(!track.is_playing());
        track.play();
        assert!(track.is_playing());
        track.set_muted(true);
        assert!(track.is_playing());
        track.pause();
        assert!(!track.is_playing());
        track.unload();
    }
}
