//! Pitch-class and octave-qualified pitch types.
//!
//! A `PitchClass` is one of the 12 equal-tempered chromatic steps,
//! octave-independent. A `Pitch` pairs a class with an octave number in
//! scientific pitch notation ("G#4"). All arithmetic is modulo 12 on the
//! class index, carrying into the octave.

use super::{TheoryError, NOTE_NAMES};
use std::fmt;
use std::str::FromStr;

/// One of the 12 chromatic pitch classes, stored as its index (0 = C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Looks up a canonical name, case-insensitively ("c#" works).
    ///
    /// Fails with `UnknownPitchClass` for anything not in the 12-name
    /// table — flats included, since the canonical spelling is sharps only.
    pub fn from_name(name: &str) -> Result<Self, TheoryError> {
        NOTE_NAMES
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            .map(|i| Self(i as u8))
            .ok_or_else(|| TheoryError::UnknownPitchClass(name.to_string()))
    }

    /// Constructs from a raw index, wrapping modulo 12.
    pub fn from_index(index: u8) -> Self {
        Self(index % 12)
    }

    /// The chromatic index, 0-11.
    pub fn index(self) -> u8 {
        self.0
    }

    /// The canonical sharp-spelled name.
    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.0 as usize]
    }

    /// Moves up by `semitones`, wrapping modulo 12.
    pub fn transpose(self, semitones: u8) -> Self {
        Self((self.0 + semitones % 12) % 12)
    }

    /// Whether this class lands on a black key of a piano keyboard.
    /// Purely a display classification; no theory depends on it.
    pub fn is_black_key(self) -> bool {
        matches!(self.0, 1 | 3 | 6 | 8 | 10)
    }
}

/// An octave-qualified pitch in scientific pitch notation.
///
/// Ordering follows chromatic height, so `E2 < A2 < E3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pitch {
    pub octave: i8,
    pub class: PitchClass,
}

impl Pitch {
    pub fn new(class: PitchClass, octave: i8) -> Self {
        Self { class, octave }
    }

    /// Parses a label of the form `<letter>[#]<integer>` (e.g. "E2",
    /// "G#4", "C-1").
    ///
    /// The split point is the first digit or minus sign; the part before
    /// it must be a canonical pitch-class name and the part after it a
    /// valid integer octave.
    pub fn parse(label: &str) -> Result<Self, TheoryError> {
        let label = label.trim();
        let octave_start = label
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(i, _)| i)
            .ok_or_else(|| TheoryError::InvalidPitchFormat(label.to_string()))?;
        if octave_start == 0 {
            return Err(TheoryError::InvalidPitchFormat(label.to_string()));
        }

        let class = PitchClass::from_name(&label[..octave_start])?;
        let octave: i8 = label[octave_start..]
            .parse()
            .map_err(|_| TheoryError::InvalidPitchFormat(label.to_string()))?;

        Ok(Self { class, octave })
    }

    /// The pitch sounded `fret` semitones above this one.
    ///
    /// Fret 0 is the open string. The class index wraps modulo 12 and the
    /// overflow carries into the octave.
    pub fn at_fret(self, fret: u32) -> Self {
        let total = self.class.index() as u32 + fret;
        Self {
            class: PitchClass::from_index((total % 12) as u8),
            octave: self.octave + (total / 12) as i8,
        }
    }

    /// MIDI note number (C-1 = 0), or None outside the 0-127 range.
    pub fn midi(self) -> Option<u8> {
        let n = (self.octave as i16 + 1) * 12 + self.class.index() as i16;
        (0..=127).contains(&n).then_some(n as u8)
    }

    /// 12-TET frequency in Hz, relative to A4 = 440 Hz.
    pub fn frequency(self) -> f32 {
        // Semitone distance from A4 (class 9, octave 4).
        let semitones = (self.octave as i32 - 4) * 12 + self.class.index() as i32 - 9;
        440.0 * 2f32.powf(semitones as f32 / 12.0)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class.name(), self.octave)
    }
}

impl FromStr for Pitch {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_index_round_trip() {
        for name in NOTE_NAMES {
            assert_eq!(PitchClass::from_name(name).unwrap().name(), name);
        }
        for i in 0..12u8 {
            assert_eq!(PitchClass::from_index(i).index(), i);
        }
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(PitchClass::from_name("c#").unwrap().name(), "C#");
        assert_eq!(PitchClass::from_name("b").unwrap().index(), 11);
    }

    #[test]
    fn test_from_name_rejects_flats() {
        assert!(PitchClass::from_name("Db").is_err());
        assert!(PitchClass::from_name("").is_err());
    }

    #[test]
    fn test_parse_valid() {
        let p = Pitch::parse("G#4").unwrap();
        assert_eq!(p.class.name(), "G#");
        assert_eq!(p.octave, 4);
        assert_eq!(Pitch::parse("C-1").unwrap().octave, -1);
        assert_eq!(Pitch::parse("A10").unwrap().octave, 10);
    }

    #[test]
    fn test_parse_invalid() {
        for bad in ["", "E", "2", "#2", "H2", "Eb3", "E#2"] {
            assert!(
                matches!(
                    Pitch::parse(bad),
                    Err(TheoryError::InvalidPitchFormat(_))
                        | Err(TheoryError::UnknownPitchClass(_))
                ),
                "expected parse failure for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        for label in ["E2", "G#4", "C-1", "A#0"] {
            assert_eq!(Pitch::parse(label).unwrap().to_string(), label);
        }
    }

    #[test]
    fn test_at_fret_arithmetic() {
        let e2 = Pitch::parse("E2").unwrap();
        for fret in 0..=24u32 {
            let p = e2.at_fret(fret);
            let total = e2.class.index() as u32 + fret;
            assert_eq!(p.class.index() as u32, total % 12);
            assert_eq!(p.octave as u32, 2 + total / 12);
        }
    }

    #[test]
    fn test_at_fret_examples() {
        let e2 = Pitch::parse("E2").unwrap();
        assert_eq!(e2.at_fret(0).to_string(), "E2");
        assert_eq!(e2.at_fret(5).to_string(), "A2");
        assert_eq!(e2.at_fret(12).to_string(), "E3");
        assert_eq!(Pitch::parse("B3").unwrap().at_fret(1).to_string(), "C4");
    }

    #[test]
    fn test_midi_numbers() {
        assert_eq!(Pitch::parse("C4").unwrap().midi(), Some(60));
        assert_eq!(Pitch::parse("A4").unwrap().midi(), Some(69));
        assert_eq!(Pitch::parse("C-1").unwrap().midi(), Some(0));
        assert_eq!(Pitch::parse("G9").unwrap().midi(), Some(127));
        assert_eq!(Pitch::parse("G#9").unwrap().midi(), None);
    }

    #[test]
    fn test_frequency_reference_points() {
        let a4 = Pitch::parse("A4").unwrap();
        assert!((a4.frequency() - 440.0).abs() < 0.01);
        // One octave down halves the frequency
        let a3 = Pitch::parse("A3").unwrap();
        assert!((a3.frequency() - 220.0).abs() < 0.01);
        let e2 = Pitch::parse("E2").unwrap();
        assert!((e2.frequency() - 82.41).abs() < 0.05);
    }

    #[test]
    fn test_black_key_classification() {
        let black: Vec<u8> = (0..12)
            .filter(|&i| PitchClass::from_index(i).is_black_key())
            .collect();
        assert_eq!(black, vec![1, 3, 6, 8, 10]);
    }
}
