//! Domain layer: patient record and the rule engine.
//!
//! Every engine function here is pure and total over a validated
//! `PatientRecord`. Validation happens once, when the record is built.

mod bmi;
mod clinical;
#[cfg(test)]
mod fixtures;
mod lifestyle;
mod patient;
mod prediction;
mod risk;
mod scan;

pub use bmi::{calculate_bmi, BmiCategory, BmiReport};
pub use clinical::{analyze_vitals_and_labs, ClinicalFlag, FlagStatus, Parameter};
pub use lifestyle::{lifestyle_recommendations, LifestyleCategory, LifestyleRecommendation};
pub use patient::{
    Answer, FieldError, Gender, Labs, MedicalHistory, PatientInput, PatientRecord, Symptoms,
    ValidationErrors, Vitals,
};
pub use prediction::{
    predict_diseases, unmerged_conditions, Disease, DiseasePrediction, DiseasePredictions,
};
pub use risk::{score_risk, Condition, RiskLevel, RiskScoreSet, MAX_RISK_SCORE};
pub use scan::{ScanBand, ScanFinding, ScanFindingError, KNOWN_SCAN_CONDITIONS};
