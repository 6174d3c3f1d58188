//! Position enumeration for the fretboard and the piano keyboard.
//!
//! Each grid is a total, eager enumeration: every (string, fret) pair or
//! every key in the fixed keyboard range, annotated with its pitch, scale
//! membership, degree, and root flag. Grids carry no identity and are
//! recomputed whenever root, scale, tuning, or fret count changes.

use crate::theory::{Pitch, Scale, Tuning};

/// Lowest octave shown on the piano panel.
pub const PIANO_START_OCTAVE: i8 = 3;

/// Number of octaves shown on the piano panel.
pub const PIANO_OCTAVES: u8 = 2;

/// One fretboard cell: a string fretted at a fret (0 = open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FretPosition {
    /// Row in display order: 0 is the highest-pitched string.
    pub string: usize,
    pub fret: u32,
    pub pitch: Pitch,
    pub in_scale: bool,
    /// 1-indexed scale degree, when `in_scale`.
    pub degree: Option<u8>,
    pub is_root: bool,
}

/// One piano key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPosition {
    /// Index within the keyboard range, left to right.
    pub index: usize,
    pub pitch: Pitch,
    pub is_black: bool,
    pub in_scale: bool,
    pub degree: Option<u8>,
    pub is_root: bool,
}

/// Enumerates every position on the fretboard for the given tuning and
/// scale, strings in display order (highest first), frets 0..=max_fret
/// per string.
pub fn fretboard_positions(tuning: &Tuning, scale: &Scale, max_fret: u32) -> Vec<FretPosition> {
    let mut positions = Vec::with_capacity(tuning.string_count() * (max_fret as usize + 1));
    for (string, open) in tuning.strings().iter().rev().enumerate() {
        for fret in 0..=max_fret {
            let pitch = open.at_fret(fret);
            let degree = scale.degree_of(pitch.class);
            positions.push(FretPosition {
                string,
                fret,
                pitch,
                in_scale: degree.is_some(),
                degree,
                is_root: scale.is_root(pitch.class),
            });
        }
    }
    positions
}

/// Enumerates the fixed piano range (two octaves from C3) against the
/// given scale. The black/white shape comes from the key's pitch class
/// and is independent of the scale.
pub fn keyboard_positions(scale: &Scale) -> Vec<KeyPosition> {
    let mut keys = Vec::with_capacity(12 * PIANO_OCTAVES as usize);
    for octave in PIANO_START_OCTAVE..PIANO_START_OCTAVE + PIANO_OCTAVES as i8 {
        for class in 0..12u8 {
            let pitch = Pitch::new(crate::theory::PitchClass::from_index(class), octave);
            let degree = scale.degree_of(pitch.class);
            keys.push(KeyPosition {
                index: keys.len(),
                pitch,
                is_black: pitch.class.is_black_key(),
                in_scale: degree.is_some(),
                degree,
                is_root: scale.is_root(pitch.class),
            });
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{PitchClass, BUILTIN_TUNINGS};

    fn standard() -> Tuning {
        let (name, labels) = BUILTIN_TUNINGS[0];
        Tuning::from_labels(name, labels).unwrap()
    }

    fn c_major() -> Scale {
        Scale::new(PitchClass::from_name("C").unwrap(), &[0, 2, 4, 5, 7, 9, 11])
    }

    #[test]
    fn test_fretboard_shape() {
        let grid = fretboard_positions(&standard(), &c_major(), 24);
        assert_eq!(grid.len(), 6 * 25);
        // Display order: string 0 is the high E
        assert_eq!(grid[0].pitch.to_string(), "E4");
        assert_eq!(grid.last().unwrap().string, 5);
        assert_eq!(grid.last().unwrap().fret, 24);
    }

    #[test]
    fn test_fret_zero_is_open_string() {
        let tuning = standard();
        let grid = fretboard_positions(&tuning, &c_major(), 12);
        for (string, pos) in grid.iter().filter(|p| p.fret == 0).enumerate() {
            let open = tuning.strings()[tuning.string_count() - 1 - string];
            assert_eq!(pos.pitch, open);
        }
    }

    #[test]
    fn test_degree_independent_of_position() {
        let scale = c_major();
        let grid = fretboard_positions(&standard(), &scale, 24);
        for pos in &grid {
            assert_eq!(pos.degree, scale.degree_of(pos.pitch.class));
            assert_eq!(pos.in_scale, pos.degree.is_some());
            assert_eq!(pos.is_root, pos.pitch.class == scale.root());
        }
        // Every C on the grid is degree 1 and flagged as root
        for pos in grid.iter().filter(|p| p.pitch.class.name() == "C") {
            assert_eq!(pos.degree, Some(1));
            assert!(pos.is_root);
        }
    }

    #[test]
    fn test_keyboard_shape() {
        let keys = keyboard_positions(&c_major());
        assert_eq!(keys.len(), 24);
        assert_eq!(keys[0].pitch.to_string(), "C3");
        assert_eq!(keys.last().unwrap().pitch.to_string(), "B4");
        let black_count = keys.iter().filter(|k| k.is_black).count();
        assert_eq!(black_count, 10);
    }

    #[test]
    fn test_keyboard_membership() {
        let keys = keyboard_positions(&c_major());
        // C major hits every white key and no black key in this range
        for key in &keys {
            assert_eq!(key.in_scale, !key.is_black);
        }
        assert!(keys[0].is_root);
        assert_eq!(keys[0].degree, Some(1));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let a = fretboard_positions(&standard(), &c_major(), 24);
        let b = fretboard_positions(&standard(), &c_major(), 24);
        assert_eq!(a, b);
    }
}
