//! Scan classifier port: Trait for imaging classifiers.
//!
//! The engine only depends on the finding a classifier produces, never on a
//! particular model, so any implementation can be swapped in here.

use crate::domain::ScanFinding;
use crate::CardioriskError;

/// Trait for medical scan classifiers.
///
/// Implementations turn a raw scan payload (X-ray, CT or MRI image bytes)
/// into condition → probability pairs. The call is synchronous: a finding
/// must be fully resolved before it is handed to the predictor.
pub trait ScanClassifier: Send + Sync {
    /// Classify one scan.
    ///
    /// # Errors
    /// Returns `CardioriskError::Classifier` if the payload cannot be
    /// classified, or `CardioriskError::MalformedScanFinding` if the model
    /// produced an out-of-range probability.
    fn classify(&self, scan: &[u8]) -> Result<ScanFinding, CardioriskError>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}
