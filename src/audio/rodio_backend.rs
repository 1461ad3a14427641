use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::debug;

use super::{AudioBackend, AudioError, Track};

const MUSIC_VOLUME: f32 = 1.0;

/// Plays tracks on the default output device.
pub struct RodioBackend {
    // Dropping the stream silences every sink created from it.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioBackend {
    pub fn open() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

pub struct RodioTrack {
    sink: Sink,
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, path: &Path, muted: bool) -> Result<Box<dyn Track>, AudioError> {
        let file = File::open(path).map_err(|source| AudioError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let source =
            Decoder::new_looped(BufReader::new(file)).map_err(|e| AudioError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Device(e.to_string()))?;

        sink.pause();
        sink.set_volume(if muted { 0.0 } else { MUSIC_VOLUME });
        sink.append(source);
        debug!(path = %path.display(), "rodio sink ready");

        Ok(Box::new(RodioTrack { sink }))
    }

    fn name(&self) -> &str {
        "rodio"
    }
}

impl Track for RodioTrack {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn set_muted(&mut self, muted: bool) {
        self.sink.set_volume(if muted { 0.0 } else { MUSIC_VOLUME });
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }

    fn unload(self: Box<Self>) {
        self.sink.stop();
    }
}
