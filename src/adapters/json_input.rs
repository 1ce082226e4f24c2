//! JSON intake: reads patient forms and scan findings from disk or strings.

use std::fmt;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::domain::{PatientInput, PatientRecord, ScanFinding};
use crate::CardioriskError;

/// Parse and validate a patient form.
///
/// # Errors
/// Returns `Serialization` for malformed JSON or unknown fields, and
/// `InvalidInput` listing every field that fails validation.
pub fn parse_patient(json: &str) -> Result<PatientRecord, CardioriskError> {
    let input: PatientInput = serde_json::from_str(json)?;
    Ok(PatientRecord::try_from(input)?)
}

/// Read and validate a patient form from a file.
///
/// # Errors
/// Returns `Io` if the file cannot be read, otherwise as [`parse_patient`].
pub fn load_patient(path: &Path) -> Result<PatientRecord, CardioriskError> {
    let json = std::fs::read_to_string(path)?;
    parse_patient(&json)
}

/// Condition → probability entries as they appear in the document.
struct FindingEntries(Vec<(String, f64)>);

impl<'de> Deserialize<'de> for FindingEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = FindingEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of condition names to probabilities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, f64>()? {
                    entries.push(entry);
                }
                Ok(FindingEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Parse a scan finding produced by an external classifier.
///
/// Entries keep the order of the document. A repeated condition keeps its
/// last probability.
///
/// # Errors
/// Returns `Serialization` for malformed JSON and `MalformedScanFinding`
/// for a probability outside `[0, 1]`.
pub fn parse_scan_finding(json: &str) -> Result<ScanFinding, CardioriskError> {
    let FindingEntries(entries) = serde_json::from_str(json)?;
    Ok(ScanFinding::from_pairs(entries)?)
}

/// Read a scan finding from a file.
///
/// # Errors
/// Returns `Io` if the file cannot be read, otherwise as [`parse_scan_finding`].
pub fn load_scan_finding(path: &Path) -> Result<ScanFinding, CardioriskError> {
    let json = std::fs::read_to_string(path)?;
    parse_scan_finding(&json)
}
