//! # Cardiorisk
//!
//! Rule-based cardiovascular risk assessment.
//!
//! This crate provides:
//! - Validated patient records with range-checked vitals and labs
//! - Additive risk scores for heart attack, stroke, cardiac arrest and heart failure
//! - Disease predictions, optionally merged with an imaging classifier's finding
//! - Clinical flags for abnormal readings, lifestyle advice and BMI
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Patient record and the pure rule engine
//! - `ports`: Trait definitions for external collaborators (scan classifier)
//! - `adapters`: JSON intake, placeholder classifier, log redaction
//! - `application`: Assessment orchestration and report rendering

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use domain::{PatientInput, PatientRecord, RiskLevel, ScanFinding};

/// Result type for Cardiorisk operations
pub type Result<T> = std::result::Result<T, CardioriskError>;

/// Main error type for Cardiorisk
#[derive(Debug, thiserror::Error)]
pub enum CardioriskError {
    #[error("Invalid patient data: {0}")]
    InvalidInput(#[from] domain::ValidationErrors),

    #[error("Malformed scan finding: {0}")]
    MalformedScanFinding(#[from] domain::ScanFindingError),

    #[error("Scan classifier failed: {0}")]
    Classifier(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
