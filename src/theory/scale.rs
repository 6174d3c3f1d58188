//! Scale derivation and the built-in scale/mode table.

use super::PitchClass;

/// Built-in scale and mode definitions.
///
/// Each entry maps a display name to an ordered list of semitone offsets
/// from the root; the first offset is always 0 (the root itself) and the
/// position of an offset determines the displayed scale degree. New scales
/// are added here (or via a user tables file), never by changing engine
/// code.
pub const BUILTIN_SCALES: &[(&str, &[u8])] = &[
    // Major / minor
    ("Major", &[0, 2, 4, 5, 7, 9, 11]),
    ("Minor", &[0, 2, 3, 5, 7, 8, 10]),
    ("Harmonic Minor", &[0, 2, 3, 5, 7, 8, 11]),
    ("Melodic Minor", &[0, 2, 3, 5, 7, 9, 11]),
    // Pentatonics / blues
    ("Major Pentatonic", &[0, 2, 4, 7, 9]),
    ("Minor Pentatonic", &[0, 3, 5, 7, 10]),
    ("Blues", &[0, 3, 5, 6, 7, 10]),
    // Modes
    ("Dorian", &[0, 2, 3, 5, 7, 9, 10]),
    ("Phrygian", &[0, 1, 3, 5, 7, 8, 10]),
    ("Lydian", &[0, 2, 4, 6, 7, 9, 11]),
    ("Mixolydian", &[0, 2, 4, 5, 7, 9, 10]),
    ("Locrian", &[0, 1, 3, 5, 6, 8, 10]),
];

/// A scale instance: a root pitch class plus the ordered pitch classes
/// produced by applying an interval definition to it.
///
/// The note list preserves interval order, because position encodes the
/// scale degree (index + 1). Offsets are applied exactly as given; a
/// malformed interval table (duplicates, values above 11) produces
/// visibly wrong output rather than a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    root: PitchClass,
    notes: Vec<PitchClass>,
}

impl Scale {
    pub fn new(root: PitchClass, intervals: &[u8]) -> Self {
        Self {
            root,
            notes: intervals.iter().map(|&o| root.transpose(o)).collect(),
        }
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// The scale's pitch classes in degree order.
    pub fn notes(&self) -> &[PitchClass] {
        &self.notes
    }

    /// The scale's note names in degree order, for display.
    pub fn note_names(&self) -> Vec<&'static str> {
        self.notes.iter().map(|pc| pc.name()).collect()
    }

    /// 1-indexed scale degree of a pitch class, or None if it is not a
    /// member. First occurrence wins if the interval table held duplicates.
    pub fn degree_of(&self, pc: PitchClass) -> Option<u8> {
        self.notes.iter().position(|&n| n == pc).map(|i| i as u8 + 1)
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.notes.contains(&pc)
    }

    pub fn is_root(&self, pc: PitchClass) -> bool {
        pc == self.root
    }
}
