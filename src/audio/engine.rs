//! Tone synthesis for single-note playback.
//!
//! Clicking or selecting a position plays its pitch as a fixed-envelope
//! sine tone. Playback is fire-and-forget: the source is handed to the
//! rodio output thread and forgotten.

use crate::theory::Pitch;
use anyhow::{Context, Result};
use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Source};
use std::time::Duration;

/// Default tone length, roughly an eighth note at a moderate tempo.
pub const DEFAULT_NOTE_DURATION: Duration = Duration::from_millis(300);

/// Output gain for the tone. Sine waves at full scale are unpleasant.
const TONE_AMPLITUDE: f32 = 0.25;

/// Attack ramp applied to the front of the tone to avoid clicks.
const FADE_IN: Duration = Duration::from_millis(5);

/// Audio output for note playback.
///
/// Owns the output stream for its whole lifetime; dropping the engine
/// stops audio. Construction fails when no output device is available,
/// in which case the app runs silent.
pub struct AudioEngine {
    /// Must be kept alive for the handle to keep working.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioEngine {
    /// Opens the default audio output device.
    pub fn new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("Failed to open audio output")?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    /// Plays a tone at the pitch's frequency for the given duration.
    ///
    /// Non-blocking; a failure to enqueue (e.g. the device went away) is
    /// logged and otherwise ignored.
    pub fn play(&self, pitch: Pitch, duration: Duration) {
        let mut tone = SineWave::new(pitch.frequency()).take_duration(duration);
        tone.set_filter_fadeout();
        let source = tone.fade_in(FADE_IN).amplify(TONE_AMPLITUDE);

        if let Err(e) = self.handle.play_raw(source.convert_samples()) {
            tracing::warn!("failed to play {pitch}: {e}");
        }
    }
}
