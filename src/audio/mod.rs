//! Audio output for note playback.
//!
//! The engine synthesizes a short tone for a single pitch via rodio.
//! It is a collaborator of the app, not of the theory engine: the
//! theory side only ever hands it a pitch and a duration.

pub mod engine;

pub use engine::AudioEngine;
