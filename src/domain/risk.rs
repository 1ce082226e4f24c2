//! Additive rule-based risk scoring.
//!
//! Each condition starts at zero and collects fixed points for every risk
//! factor present in the record. Totals are capped at 100; overshoot is not
//! an error.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::patient::PatientRecord;

/// Upper bound of every risk score.
pub const MAX_RISK_SCORE: u8 = 100;

/// Systolic pressure above this adds heart attack and stroke points.
const SYSTOLIC_RISK_THRESHOLD: u16 = 140;
/// Diastolic pressure above this adds heart attack points.
const DIASTOLIC_RISK_THRESHOLD: u16 = 90;
/// Total cholesterol (mg/dL) above this adds heart attack points.
const CHOLESTEROL_RISK_THRESHOLD: f64 = 200.0;
/// Age above this adds stroke and heart failure points.
const AGE_RISK_THRESHOLD: u16 = 65;

/// Risk band used when presenting a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum RiskLevel {
    /// Score below 30
    Low,
    /// Score from 30 up to 60
    Moderate,
    /// Score of 60 and above
    High,
}

impl RiskLevel {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score < 30 {
            Self::Low
        } else if score < 60 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Moderate => write!(f, "Moderate"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Conditions scored by [`score_risk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum Condition {
    HeartAttack,
    Stroke,
    CardiacArrest,
    HeartFailure,
}

impl Condition {
    /// All conditions in reporting order.
    pub const ALL: [Condition; 4] = [
        Self::HeartAttack,
        Self::Stroke,
        Self::CardiacArrest,
        Self::HeartFailure,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::HeartAttack => "Heart Attack",
            Self::Stroke => "Stroke",
            Self::CardiacArrest => "Cardiac Arrest",
            Self::HeartFailure => "Heart Failure",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-condition risk percentages, each within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskScoreSet {
    heart_attack: u8,
    stroke: u8,
    cardiac_arrest: u8,
    heart_failure: u8,
}

impl RiskScoreSet {
    /// Build a score set directly; values above 100 are capped.
    #[must_use]
    pub fn new(heart_attack: u8, stroke: u8, cardiac_arrest: u8, heart_failure: u8) -> Self {
        Self {
            heart_attack: heart_attack.min(MAX_RISK_SCORE),
            stroke: stroke.min(MAX_RISK_SCORE),
            cardiac_arrest: cardiac_arrest.min(MAX_RISK_SCORE),
            heart_failure: heart_failure.min(MAX_RISK_SCORE),
        }
    }

    #[must_use]
    pub fn get(&self, condition: Condition) -> u8 {
        match condition {
            Condition::HeartAttack => self.heart_attack,
            Condition::Stroke => self.stroke,
            Condition::CardiacArrest => self.cardiac_arrest,
            Condition::HeartFailure => self.heart_failure,
        }
    }

    #[must_use]
    pub fn level(&self, condition: Condition) -> RiskLevel {
        RiskLevel::from_score(self.get(condition))
    }

    /// Scores in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Condition, u8)> + '_ {
        Condition::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl Serialize for RiskScoreSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Condition::ALL.len()))?;
        for (condition, score) in self.iter() {
            map.serialize_entry(condition.name(), &score)?;
        }
        map.end()
    }
}

#[derive(Default)]
struct Accumulator(u32);

impl Accumulator {
    fn add_if(&mut self, present: bool, points: u32) {
        if present {
            self.0 += points;
        }
    }

    fn finish(self) -> u8 {
        u8::try_from(self.0.min(u32::from(MAX_RISK_SCORE))).unwrap_or(MAX_RISK_SCORE)
    }
}

/// Score a patient for each condition.
///
/// Weights:
/// - Heart attack: systolic > 140 (+15), diastolic > 90 (+10), smoking (+20),
///   cholesterol > 200 (+15), diabetes (+15), family history (+10), obesity (+10)
/// - Stroke: systolic > 140 (+20), smoking (+15), diabetes (+15), age > 65 (+20),
///   previous stroke (+10)
/// - Cardiac arrest: previous heart attack (+25), heart failure (+20),
///   chest pain (+15), shortness of breath (+20)
/// - Heart failure: age > 65 (+15), hypertension (+20), diabetes (+15),
///   obesity (+15), coronary artery disease (+20)
#[must_use]
pub fn score_risk(record: &PatientRecord) -> RiskScoreSet {
    let vitals = record.vitals();
    let labs = record.labs();
    let history = record.history();
    let symptoms = record.symptoms();

    let high_systolic = vitals.systolic_bp > SYSTOLIC_RISK_THRESHOLD;
    let older = record.age() > AGE_RISK_THRESHOLD;

    let mut heart_attack = Accumulator::default();
    heart_attack.add_if(high_systolic, 15);
    heart_attack.add_if(vitals.diastolic_bp > DIASTOLIC_RISK_THRESHOLD, 10);
    heart_attack.add_if(history.smoking, 20);
    heart_attack.add_if(labs.cholesterol_mg_dl > CHOLESTEROL_RISK_THRESHOLD, 15);
    heart_attack.add_if(history.diabetes, 15);
    heart_attack.add_if(history.family_history, 10);
    heart_attack.add_if(history.obesity, 10);

    let mut stroke = Accumulator::default();
    stroke.add_if(high_systolic, 20);
    stroke.add_if(history.smoking, 15);
    stroke.add_if(history.diabetes, 15);
    stroke.add_if(older, 20);
    stroke.add_if(history.previous_stroke, 10);

    let mut cardiac_arrest = Accumulator::default();
    cardiac_arrest.add_if(history.previous_heart_attack, 25);
    cardiac_arrest.add_if(history.heart_failure, 20);
    cardiac_arrest.add_if(symptoms.chest_pain, 15);
    cardiac_arrest.add_if(symptoms.shortness_of_breath, 20);

    let mut heart_failure = Accumulator::default();
    heart_failure.add_if(older, 15);
    heart_failure.add_if(history.hypertension, 20);
    heart_failure.add_if(history.diabetes, 15);
    heart_failure.add_if(history.obesity, 15);
    heart_failure.add_if(history.coronary_artery_disease, 20);

    RiskScoreSet {
        heart_attack: heart_attack.finish(),
        stroke: stroke.finish(),
        cardiac_arrest: cardiac_arrest.finish(),
        heart_failure: heart_failure.finish(),
    }
}
