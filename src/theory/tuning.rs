//! Guitar tunings and the built-in tuning table.

use super::{Pitch, TheoryError};

/// Built-in tunings as octave-qualified open-string labels, ordered from
/// the lowest-pitched string to the highest. Display layers that want the
/// conventional high-string-on-top orientation reverse this order
/// themselves.
pub const BUILTIN_TUNINGS: &[(&str, &[&str])] = &[
    ("Standard", &["E2", "A2", "D3", "G3", "B3", "E4"]),
    ("Drop D", &["D2", "A2", "D3", "G3", "B3", "E4"]),
    ("Drop C#", &["C#2", "G#2", "C#3", "F#3", "A#3", "D#4"]),
    ("Drop C", &["C2", "G2", "C3", "F3", "A3", "D4"]),
    ("Open G", &["D2", "G2", "D3", "G3", "B3", "D4"]),
    ("Open D", &["D2", "A2", "D3", "F#3", "A3", "D4"]),
    ("Open C", &["C2", "G2", "C3", "G3", "C4", "E4"]),
    ("Open E", &["E2", "B2", "E3", "G#3", "B3", "E4"]),
    ("DADGAD", &["D2", "A2", "D3", "G3", "A3", "D4"]),
];

/// A named tuning: the ordered open-string pitches of a fretted
/// instrument, stored low-to-high.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuning {
    pub name: String,
    strings: Vec<Pitch>,
}

impl Tuning {
    /// Builds a tuning from open-string labels. Fails if any label does
    /// not parse or if the list is empty.
    pub fn from_labels<S: AsRef<str>>(name: &str, labels: &[S]) -> Result<Self, TheoryError> {
        if labels.is_empty() {
            return Err(TheoryError::InvalidPitchFormat(String::new()));
        }
        let strings = labels
            .iter()
            .map(|l| Pitch::parse(l.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_string(),
            strings,
        })
    }

    /// Open-string pitches, low to high.
    pub fn strings(&self) -> &[Pitch] {
        &self.strings
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tunings_parse() {
        for (name, labels) in BUILTIN_TUNINGS {
            let tuning = Tuning::from_labels(name, labels)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(tuning.string_count(), 6);
        }
    }

    #[test]
    fn test_standard_tuning_order() {
        let (name, labels) = BUILTIN_TUNINGS[0];
        let tuning = Tuning::from_labels(name, labels).unwrap();
        let labels: Vec<String> = tuning.strings().iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["E2", "A2", "D3", "G3", "B3", "E4"]);
        // Low to high really is ascending
        assert!(tuning.strings().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_tuning_rejected() {
        let labels: &[&str] = &[];
        assert!(Tuning::from_labels("Empty", labels).is_err());
    }

    #[test]
    fn test_bad_label_rejected() {
        assert!(Tuning::from_labels("Bad", &["E2", "X9"]).is_err());
    }
}
