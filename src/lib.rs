//! frettui - a terminal scale explorer for fretboard and keyboard.
//!
//! This library provides the core functionality for the scale explorer app.

pub mod app;
pub mod audio;
pub mod board;
pub mod tables;
pub mod theory;
pub mod ui;

// Re-export commonly used types
pub use app::{App, FocusedPanel};
pub use audio::AudioEngine;
pub use board::{fretboard_positions, keyboard_positions, FretPosition, KeyPosition};
pub use tables::Tables;
pub use theory::{note_at_fret, scale_notes, Pitch, PitchClass, Scale, TheoryError, Tuning};
