//! Clinical flagging of abnormal vitals and laboratory values.

use serde::Serialize;

use crate::domain::patient::PatientRecord;
use crate::domain::risk::RiskLevel;

const BP_CRISIS_SYSTOLIC: u16 = 180;
const BP_CRISIS_DIASTOLIC: u16 = 120;
const BP_HIGH_SYSTOLIC: u16 = 140;
const BP_HIGH_DIASTOLIC: u16 = 90;
const CHOLESTEROL_HIGH: f64 = 240.0;
const BLOOD_SUGAR_HIGH: f64 = 126.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Parameter {
    BloodPressure,
    Cholesterol,
    BloodSugar,
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BloodPressure => write!(f, "Blood Pressure"),
            Self::Cholesterol => write!(f, "Cholesterol"),
            Self::BloodSugar => write!(f, "Blood Sugar"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlagStatus {
    High,
    Crisis,
}

impl std::fmt::Display for FlagStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Crisis => write!(f, "Crisis"),
        }
    }
}

/// Alert for one reading that crossed a threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicalFlag {
    pub parameter: Parameter,
    /// Reading as entered, e.g. `150/95` or `250.0`.
    pub value: String,
    pub status: FlagStatus,
    pub risk_level: RiskLevel,
    pub recommendation: &'static str,
}

/// Flag abnormal readings in the order blood pressure, cholesterol, blood sugar.
///
/// Normal readings produce no flag.
#[must_use]
pub fn analyze_vitals_and_labs(record: &PatientRecord) -> Vec<ClinicalFlag> {
    let mut flags = Vec::new();
    let vitals = record.vitals();
    let labs = record.labs();

    let bp_value = || format!("{}/{}", vitals.systolic_bp, vitals.diastolic_bp);
    if vitals.systolic_bp >= BP_CRISIS_SYSTOLIC || vitals.diastolic_bp >= BP_CRISIS_DIASTOLIC {
        flags.push(ClinicalFlag {
            parameter: Parameter::BloodPressure,
            value: bp_value(),
            status: FlagStatus::Crisis,
            risk_level: RiskLevel::High,
            recommendation: "Seek immediate medical attention",
        });
    } else if vitals.systolic_bp >= BP_HIGH_SYSTOLIC || vitals.diastolic_bp >= BP_HIGH_DIASTOLIC {
        flags.push(ClinicalFlag {
            parameter: Parameter::BloodPressure,
            value: bp_value(),
            status: FlagStatus::High,
            risk_level: RiskLevel::Moderate,
            recommendation: "Consult healthcare provider and consider lifestyle changes",
        });
    }

    if labs.cholesterol_mg_dl > CHOLESTEROL_HIGH {
        flags.push(ClinicalFlag {
            parameter: Parameter::Cholesterol,
            value: format_reading(labs.cholesterol_mg_dl),
            status: FlagStatus::High,
            risk_level: RiskLevel::High,
            recommendation: "Consult doctor and consider diet modifications",
        });
    }

    if labs.fasting_blood_sugar_mg_dl > BLOOD_SUGAR_HIGH {
        flags.push(ClinicalFlag {
            parameter: Parameter::BloodSugar,
            value: format_reading(labs.fasting_blood_sugar_mg_dl),
            status: FlagStatus::High,
            risk_level: RiskLevel::High,
            recommendation: "Monitor blood sugar and consult endocrinologist",
        });
    }

    flags
}

/// Whole readings keep one decimal (`250.0`); fractional ones print as entered.
fn format_reading(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
