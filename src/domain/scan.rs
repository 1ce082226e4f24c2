//! Scan findings supplied by an external imaging classifier.
//!
//! A finding maps condition names to probabilities in `[0, 1]`. Probabilities
//! are checked when entries are added, so a `ScanFinding` in hand never
//! carries a value that would scale past 100%.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Condition names a scan classifier is expected to report.
pub const KNOWN_SCAN_CONDITIONS: [&str; 4] = [
    "Coronary Artery Disease",
    "Cardiomegaly",
    "Pulmonary Edema",
    "Pleural Effusion",
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("probability {probability} for {condition:?} is outside [0, 1]")]
pub struct ScanFindingError {
    pub condition: String,
    pub probability: f64,
}

/// Display band for a single scan probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ScanBand {
    /// 0.3 or below
    Low,
    /// Above 0.3 up to 0.5
    Elevated,
    /// Above 0.5
    High,
}

impl ScanBand {
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.5 {
            Self::High
        } else if probability > 0.3 {
            Self::Elevated
        } else {
            Self::Low
        }
    }
}

/// Condition → probability pairs in insertion order.
///
/// Serializes as a JSON object in that order. Reading one back goes through
/// [`ScanFinding::from_pairs`] so that range errors stay typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanFinding {
    entries: Vec<(String, f64)>,
}

impl ScanFinding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a finding from pairs, rejecting the first invalid probability.
    ///
    /// # Errors
    /// Returns `ScanFindingError` if a probability is non-finite or outside `[0, 1]`.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, ScanFindingError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut finding = Self::new();
        for (condition, probability) in pairs {
            finding.insert(condition, probability)?;
        }
        Ok(finding)
    }

    /// Add or replace the probability for a condition.
    ///
    /// # Errors
    /// Returns `ScanFindingError` if `probability` is non-finite or outside `[0, 1]`.
    pub fn insert(
        &mut self,
        condition: impl Into<String>,
        probability: f64,
    ) -> Result<(), ScanFindingError> {
        let condition = condition.into();
        if !(0.0..=1.0).contains(&probability) {
            return Err(ScanFindingError {
                condition,
                probability,
            });
        }

        match self.entries.iter_mut().find(|(name, _)| *name == condition) {
            Some(entry) => entry.1 = probability,
            None => self.entries.push((condition, probability)),
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, condition: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == condition)
            .map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, p)| (name.as_str(), *p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Conditions outside [`KNOWN_SCAN_CONDITIONS`].
    pub fn unknown_conditions(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .map(|(name, _)| name)
            .filter(|name| !KNOWN_SCAN_CONDITIONS.iter().any(|known| known == name))
    }
}

impl Serialize for ScanFinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, probability) in &self.entries {
            map.serialize_entry(name, probability)?;
        }
        map.end()
    }
}
