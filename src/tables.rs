//! User-extensible tuning and scale tables.
//!
//! The built-in tables cover the common cases; a JSON file passed via
//! `--tables` appends to them. Tables are data: adding a tuning or scale
//! never touches engine code.
//!
//! File format:
//!
//! ```json
//! {
//!   "tunings": [{ "name": "All Fourths", "strings": ["E2", "A2", "D3", "G3", "C4", "F4"] }],
//!   "scales":  [{ "name": "Whole Tone", "intervals": [0, 2, 4, 6, 8, 10] }]
//! }
//! ```

use crate::theory::{Tuning, BUILTIN_SCALES, BUILTIN_TUNINGS};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// A named scale definition as held by the app: display name plus the
/// ordered semitone offsets from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleDef {
    pub name: String,
    pub intervals: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct TablesFile {
    #[serde(default)]
    tunings: Vec<TuningEntry>,
    #[serde(default)]
    scales: Vec<ScaleEntry>,
}

#[derive(Debug, Deserialize)]
struct TuningEntry {
    name: String,
    strings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScaleEntry {
    name: String,
    intervals: Vec<u8>,
}

/// The merged tables the app selects from.
#[derive(Debug, Clone)]
pub struct Tables {
    pub tunings: Vec<Tuning>,
    pub scales: Vec<ScaleDef>,
}

impl Tables {
    /// The built-in tables alone.
    pub fn builtin() -> Self {
        let tunings = BUILTIN_TUNINGS
            .iter()
            .map(|(name, labels)| {
                // Built-in labels are covered by tests; a failure here is a
                // broken build, not a runtime condition.
                Tuning::from_labels(name, labels).expect("built-in tuning table is valid")
            })
            .collect();
        let scales = BUILTIN_SCALES
            .iter()
            .map(|(name, intervals)| ScaleDef {
                name: name.to_string(),
                intervals: intervals.to_vec(),
            })
            .collect();
        Self { tunings, scales }
    }

    /// Built-in tables plus the entries from a user tables file.
    pub fn with_user_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tables file: {}", path.display()))?;
        let file: TablesFile = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse tables file: {}", path.display()))?;

        let mut tables = Self::builtin();
        for entry in file.tunings {
            let tuning = Tuning::from_labels(&entry.name, &entry.strings)
                .with_context(|| format!("invalid tuning {:?}", entry.name))?;
            tables.tunings.push(tuning);
        }
        for entry in file.scales {
            validate_intervals(&entry.name, &entry.intervals)?;
            tables.scales.push(ScaleDef {
                name: entry.name,
                intervals: entry.intervals,
            });
        }
        Ok(tables)
    }

    pub fn tuning_index(&self, name: &str) -> Option<usize> {
        self.tunings
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn scale_index(&self, name: &str) -> Option<usize> {
        self.scales
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }
}

/// Rejects interval lists the engine would render nonsensically:
/// empty, not rooted at 0, or with offsets outside [0, 11].
fn validate_intervals(name: &str, intervals: &[u8]) -> Result<()> {
    if intervals.is_empty() {
        bail!("scale {:?} has no intervals", name);
    }
    if intervals[0] != 0 {
        bail!("scale {:?} must start at offset 0", name);
    }
    if let Some(&bad) = intervals.iter().find(|&&o| o > 11) {
        bail!("scale {:?} has out-of-range offset {}", name, bad);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let tables = Tables::builtin();
        assert_eq!(tables.tunings.len(), 9);
        assert_eq!(tables.scales.len(), 12);
        assert_eq!(tables.tuning_index("standard"), Some(0));
        assert_eq!(tables.scale_index("MAJOR"), Some(0));
        assert_eq!(tables.scale_index("Klezmer"), None);
    }

    #[test]
    fn test_user_file_merges() {
        let dir = std::env::temp_dir().join("frettui-tables-ok");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tables.json");
        std::fs::write(
            &path,
            r#"{
                "tunings": [{ "name": "All Fourths", "strings": ["E2", "A2", "D3", "G3", "C4", "F4"] }],
                "scales":  [{ "name": "Whole Tone", "intervals": [0, 2, 4, 6, 8, 10] }]
            }"#,
        )
        .unwrap();

        let tables = Tables::with_user_file(&path).unwrap();
        assert_eq!(tables.tunings.len(), 10);
        assert_eq!(tables.scales.len(), 13);
        assert!(tables.tuning_index("all fourths").is_some());
        assert!(tables.scale_index("Whole Tone").is_some());
    }

    #[test]
    fn test_user_file_rejects_bad_scale() {
        let dir = std::env::temp_dir().join("frettui-tables-bad");
        std::fs::create_dir_all(&dir).unwrap();

        for (file, body) in [
            (
                "no-root.json",
                r#"{ "scales": [{ "name": "X", "intervals": [1, 2] }] }"#,
            ),
            (
                "range.json",
                r#"{ "scales": [{ "name": "X", "intervals": [0, 13] }] }"#,
            ),
            (
                "tuning.json",
                r#"{ "tunings": [{ "name": "X", "strings": ["E2", "H9"] }] }"#,
            ),
        ] {
            let path = dir.join(file);
            std::fs::write(&path, body).unwrap();
            assert!(Tables::with_user_file(&path).is_err(), "{file} accepted");
        }
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(Tables::with_user_file(Path::new("/nonexistent/tables.json")).is_err());
    }
}
