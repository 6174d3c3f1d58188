//! Music theory engine: pitches, scales, and tunings.
//!
//! Everything in this module is a pure function over immutable inputs.
//! The display layers and the audio engine consume its output but never
//! feed state back into it.

mod pitch;
mod scale;
mod tuning;

pub use pitch::{Pitch, PitchClass};
pub use scale::{Scale, BUILTIN_SCALES};
pub use tuning::{Tuning, BUILTIN_TUNINGS};

use thiserror::Error;

/// Canonical pitch-class names, sharps only, in chromatic order.
/// Index into this table is the pitch-class index (0 = C, 11 = B).
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Failures raised by the theory engine.
///
/// Both variants are programming errors in normal operation: every value
/// the UI passes in originates from the fixed tables, which are validated
/// at load time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TheoryError {
    /// An octave-qualified pitch label did not parse (e.g. "H2", "E", "E#").
    #[error("invalid pitch format: {0:?}")]
    InvalidPitchFormat(String),

    /// A pitch-class name is not one of the 12 canonical names.
    #[error("unknown pitch class: {0:?}")]
    UnknownPitchClass(String),
}

/// Computes the pitch sounded by fretting a string at the given fret.
///
/// `open_label` is the open string's octave-qualified pitch (e.g. "E2");
/// fret 0 is the open string itself.
///
/// # Examples
///
/// ```
/// use frettui::theory::note_at_fret;
///
/// let p = note_at_fret("E2", 12).unwrap();
/// assert_eq!(p.to_string(), "E3");
/// ```
pub fn note_at_fret(open_label: &str, fret: u32) -> Result<Pitch, TheoryError> {
    Ok(Pitch::parse(open_label)?.at_fret(fret))
}

/// Derives the ordered note names of a scale from a root name and a list
/// of semitone offsets.
///
/// Output order follows interval order: the note at index `i` is scale
/// degree `i + 1`. The offsets are taken as given; they are neither
/// sorted, deduplicated, nor range-checked here.
pub fn scale_notes(root: &str, intervals: &[u8]) -> Result<Vec<&'static str>, TheoryError> {
    let root = PitchClass::from_name(root)?;
    Ok(Scale::new(root, intervals).note_names())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_at_fret_open_string() {
        assert_eq!(note_at_fret("E2", 0).unwrap().to_string(), "E2");
    }

    #[test]
    fn test_note_at_fret_octave_wrap() {
        assert_eq!(note_at_fret("E2", 12).unwrap().to_string(), "E3");
        assert_eq!(note_at_fret("E2", 24).unwrap().to_string(), "E4");
        // B3 + 1 crosses into the next octave (B -> C)
        assert_eq!(note_at_fret("B3", 1).unwrap().to_string(), "C4");
    }

    #[test]
    fn test_note_at_fret_invalid() {
        assert!(matches!(
            note_at_fret("E", 0),
            Err(TheoryError::InvalidPitchFormat(_))
        ));
    }

    #[test]
    fn test_scale_notes_c_major() {
        assert_eq!(
            scale_notes("C", &[0, 2, 4, 5, 7, 9, 11]).unwrap(),
            vec!["C", "D", "E", "F", "G", "A", "B"]
        );
    }

    #[test]
    fn test_scale_notes_a_minor() {
        assert_eq!(
            scale_notes("A", &[0, 2, 3, 5, 7, 8, 10]).unwrap(),
            vec!["A", "B", "C", "D", "E", "F", "G"]
        );
    }

    #[test]
    fn test_scale_notes_chromatic_is_rotation() {
        let chromatic: Vec<u8> = (0..12).collect();
        for (i, root) in NOTE_NAMES.iter().enumerate() {
            let notes = scale_notes(root, &chromatic).unwrap();
            for (j, name) in notes.iter().enumerate() {
                assert_eq!(*name, NOTE_NAMES[(i + j) % 12]);
            }
        }
    }

    #[test]
    fn test_scale_notes_unknown_root() {
        assert_eq!(
            scale_notes("H", &[0]),
            Err(TheoryError::UnknownPitchClass("H".to_string()))
        );
    }
}
