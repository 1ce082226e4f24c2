//! Placeholder scan classifier.
//!
//! Stands in for a trained imaging model. It does not decode the image; any
//! non-empty payload yields the same fixed finding.

use crate::domain::ScanFinding;
use crate::ports::ScanClassifier;
use crate::CardioriskError;

/// Finding reported for every scan.
pub const PLACEHOLDER_FINDING: [(&str, f64); 4] = [
    ("Coronary Artery Disease", 0.75),
    ("Cardiomegaly", 0.45),
    ("Pulmonary Edema", 0.30),
    ("Pleural Effusion", 0.20),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderScanClassifier;

impl PlaceholderScanClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ScanClassifier for PlaceholderScanClassifier {
    fn classify(&self, scan: &[u8]) -> Result<ScanFinding, CardioriskError> {
        if scan.is_empty() {
            return Err(CardioriskError::Classifier("scan payload is empty".to_string()));
        }

        tracing::debug!("Placeholder classifier received {} bytes", scan.len());
        Ok(ScanFinding::from_pairs(PLACEHOLDER_FINDING)?)
    }

    fn name(&self) -> &str {
        "placeholder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_finding() {
        let classifier = PlaceholderScanClassifier::new();
        let finding = classifier.classify(&[0x89, 0x50, 0x4e, 0x47]).expect("Should classify");

        assert_eq!(finding.len(), 4);
        assert_eq!(finding.get("Coronary Artery Disease"), Some(0.75));
        assert_eq!(finding.get("Pleural Effusion"), Some(0.20));
        assert_eq!(finding.unknown_conditions().count(), 0);
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        let err = PlaceholderScanClassifier::new()
            .classify(&[])
            .expect_err("Empty scan must fail");
        assert!(matches!(err, CardioriskError::Classifier(_)));
    }
}
