//! Patient record types for cardiovascular risk assessment.
//!
//! `PatientInput` is the raw form as a front end submits it: every field is
//! optional and categorical answers are plain strings. `PatientRecord` is the
//! validated, immutable record that every engine component consumes. The only
//! way to obtain a `PatientRecord` is through `TryFrom<PatientInput>`, so a
//! record in hand is always within its declared bounds.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::domain::bmi::{calculate_bmi, BmiReport};

const AGE_RANGE: RangeInclusive<i64> = 18..=120;
const WEIGHT_RANGE_KG: RangeInclusive<f64> = 30.0..=200.0;
const HEIGHT_RANGE_CM: RangeInclusive<f64> = 100.0..=250.0;
const SYSTOLIC_RANGE: RangeInclusive<i64> = 70..=250;
const DIASTOLIC_RANGE: RangeInclusive<i64> = 40..=150;
const CHOLESTEROL_RANGE: RangeInclusive<f64> = 100.0..=500.0;
const BLOOD_SUGAR_RANGE: RangeInclusive<f64> = 70.0..=400.0;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("{field}: value is required")]
    Missing { field: &'static str },

    #[error("{field}: {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field}: {value} is not a finite number")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field}: {value:?} is not one of {allowed:?}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
}

impl FieldError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::OutOfRange { field, .. }
            | Self::NotFinite { field, .. }
            | Self::InvalidChoice { field, .. } => field,
        }
    }
}

/// Every field error found while validating one `PatientInput`.
///
/// Validation does not stop at the first failure, so a form can be corrected
/// in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any error refers to `field`.
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Categorical input values accepted as case-insensitive strings.
trait Choice: Sized {
    const ALLOWED: &'static [&'static str];

    fn parse(value: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Choice for Gender {
    const ALLOWED: &'static [&'static str] = &["Male", "Female"];

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

/// A yes/no answer from the history and symptom sections of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    No,
    Yes,
}

impl Answer {
    #[must_use]
    pub fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl Choice for Answer {
    const ALLOWED: &'static [&'static str] = &["Yes", "No"];

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

/// Raw patient form as submitted by a front end.
///
/// Field names follow the record; the short names used by the legacy
/// assessment form (`weight`, `height`, `cholesterol`, `blood_sugar`) are
/// accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientInput {
    pub age: Option<i64>,
    pub gender: Option<String>,
    #[serde(alias = "weight")]
    pub weight_kg: Option<f64>,
    #[serde(alias = "height")]
    pub height_cm: Option<f64>,

    pub systolic_bp: Option<i64>,
    pub diastolic_bp: Option<i64>,
    #[serde(alias = "cholesterol")]
    pub cholesterol_mg_dl: Option<f64>,
    #[serde(alias = "blood_sugar")]
    pub fasting_blood_sugar_mg_dl: Option<f64>,

    pub smoking: Option<String>,
    pub diabetes: Option<String>,
    pub hypertension: Option<String>,
    pub obesity: Option<String>,
    pub previous_heart_attack: Option<String>,
    pub previous_stroke: Option<String>,
    pub family_history: Option<String>,
    pub coronary_artery_disease: Option<String>,
    pub heart_failure: Option<String>,

    pub chest_pain: Option<String>,
    pub shortness_of_breath: Option<String>,
}

/// Blood pressure readings in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vitals {
    pub systolic_bp: u16,
    pub diastolic_bp: u16,
}

/// Laboratory results in mg/dL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Labs {
    pub cholesterol_mg_dl: f64,
    pub fasting_blood_sugar_mg_dl: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MedicalHistory {
    pub smoking: bool,
    pub diabetes: bool,
    pub hypertension: bool,
    pub obesity: bool,
    pub previous_heart_attack: bool,
    pub previous_stroke: bool,
    pub family_history: bool,
    pub coronary_artery_disease: bool,
    pub heart_failure: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Symptoms {
    pub chest_pain: bool,
    pub shortness_of_breath: bool,
}

/// Validated inputs for one patient. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRecord {
    age: u16,
    gender: Gender,
    weight_kg: f64,
    height_cm: f64,
    vitals: Vitals,
    labs: Labs,
    history: MedicalHistory,
    symptoms: Symptoms,
}

impl PatientRecord {
    /// Age in years.
    #[must_use]
    pub fn age(&self) -> u16 {
        self.age
    }

    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    #[must_use]
    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    #[must_use]
    pub fn vitals(&self) -> Vitals {
        self.vitals
    }

    #[must_use]
    pub fn labs(&self) -> Labs {
        self.labs
    }

    #[must_use]
    pub fn history(&self) -> MedicalHistory {
        self.history
    }

    #[must_use]
    pub fn symptoms(&self) -> Symptoms {
        self.symptoms
    }

    /// BMI computed from the recorded weight and height.
    #[must_use]
    pub fn bmi(&self) -> BmiReport {
        BmiReport::from_value(calculate_bmi(self.weight_kg, self.height_cm))
    }
}

/// Accumulates field errors while converting a `PatientInput`.
#[derive(Default)]
struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    fn integer(
        &mut self,
        field: &'static str,
        value: Option<i64>,
        range: RangeInclusive<i64>,
    ) -> Option<u16> {
        let Some(value) = value else {
            self.errors.push(FieldError::Missing { field });
            return None;
        };
        if !range.contains(&value) {
            self.errors.push(FieldError::OutOfRange {
                field,
                value: value as f64,
                min: *range.start() as f64,
                max: *range.end() as f64,
            });
            return None;
        }
        u16::try_from(value).ok()
    }

    fn float(
        &mut self,
        field: &'static str,
        value: Option<f64>,
        range: RangeInclusive<f64>,
    ) -> Option<f64> {
        let Some(value) = value else {
            self.errors.push(FieldError::Missing { field });
            return None;
        };
        if !value.is_finite() {
            self.errors.push(FieldError::NotFinite { field, value });
            return None;
        }
        if !range.contains(&value) {
            self.errors.push(FieldError::OutOfRange {
                field,
                value,
                min: *range.start(),
                max: *range.end(),
            });
            return None;
        }
        Some(value)
    }

    fn choice<T: Choice>(&mut self, field: &'static str, value: Option<&str>) -> Option<T> {
        let Some(value) = value else {
            self.errors.push(FieldError::Missing { field });
            return None;
        };
        let parsed = T::parse(value);
        if parsed.is_none() {
            self.errors.push(FieldError::InvalidChoice {
                field,
                value: value.to_string(),
                allowed: T::ALLOWED,
            });
        }
        parsed
    }

    fn flag(&mut self, field: &'static str, value: Option<&str>) -> Option<bool> {
        self.choice::<Answer>(field, value).map(Answer::is_yes)
    }
}

impl TryFrom<PatientInput> for PatientRecord {
    type Error = ValidationErrors;

    fn try_from(input: PatientInput) -> Result<Self, Self::Error> {
        let mut v = Validator::default();

        let age = v.integer("age", input.age, AGE_RANGE);
        let gender = v.choice::<Gender>("gender", input.gender.as_deref());
        let weight_kg = v.float("weight_kg", input.weight_kg, WEIGHT_RANGE_KG);
        let height_cm = v.float("height_cm", input.height_cm, HEIGHT_RANGE_CM);

        let systolic_bp = v.integer("systolic_bp", input.systolic_bp, SYSTOLIC_RANGE);
        let diastolic_bp = v.integer("diastolic_bp", input.diastolic_bp, DIASTOLIC_RANGE);
        let cholesterol = v.float(
            "cholesterol_mg_dl",
            input.cholesterol_mg_dl,
            CHOLESTEROL_RANGE,
        );
        let blood_sugar = v.float(
            "fasting_blood_sugar_mg_dl",
            input.fasting_blood_sugar_mg_dl,
            BLOOD_SUGAR_RANGE,
        );

        let smoking = v.flag("smoking", input.smoking.as_deref());
        let diabetes = v.flag("diabetes", input.diabetes.as_deref());
        let hypertension = v.flag("hypertension", input.hypertension.as_deref());
        let obesity = v.flag("obesity", input.obesity.as_deref());
        let previous_heart_attack =
            v.flag("previous_heart_attack", input.previous_heart_attack.as_deref());
        let previous_stroke = v.flag("previous_stroke", input.previous_stroke.as_deref());
        let family_history = v.flag("family_history", input.family_history.as_deref());
        let coronary_artery_disease = v.flag(
            "coronary_artery_disease",
            input.coronary_artery_disease.as_deref(),
        );
        let heart_failure = v.flag("heart_failure", input.heart_failure.as_deref());

        let chest_pain = v.flag("chest_pain", input.chest_pain.as_deref());
        let shortness_of_breath =
            v.flag("shortness_of_breath", input.shortness_of_breath.as_deref());

        let record = (|| {
            Some(PatientRecord {
                age: age?,
                gender: gender?,
                weight_kg: weight_kg?,
                height_cm: height_cm?,
                vitals: Vitals {
                    systolic_bp: systolic_bp?,
                    diastolic_bp: diastolic_bp?,
                },
                labs: Labs {
                    cholesterol_mg_dl: cholesterol?,
                    fasting_blood_sugar_mg_dl: blood_sugar?,
                },
                history: MedicalHistory {
                    smoking: smoking?,
                    diabetes: diabetes?,
                    hypertension: hypertension?,
                    obesity: obesity?,
                    previous_heart_attack: previous_heart_attack?,
                    previous_stroke: previous_stroke?,
                    family_history: family_history?,
                    coronary_artery_disease: coronary_artery_disease?,
                    heart_failure: heart_failure?,
                },
                symptoms: Symptoms {
                    chest_pain: chest_pain?,
                    shortness_of_breath: shortness_of_breath?,
                },
            })
        })();

        match record {
            Some(record) if v.errors.is_empty() => Ok(record),
            _ => Err(ValidationErrors(v.errors)),
        }
    }
}

impl From<&PatientRecord> for PatientInput {
    fn from(record: &PatientRecord) -> Self {
        let answer = |flag: bool| Some(Answer::from(flag).to_string());
        let h = record.history;
        let s = record.symptoms;

        Self {
            age: Some(i64::from(record.age)),
            gender: Some(record.gender.to_string()),
            weight_kg: Some(record.weight_kg),
            height_cm: Some(record.height_cm),
            systolic_bp: Some(i64::from(record.vitals.systolic_bp)),
            diastolic_bp: Some(i64::from(record.vitals.diastolic_bp)),
            cholesterol_mg_dl: Some(record.labs.cholesterol_mg_dl),
            fasting_blood_sugar_mg_dl: Some(record.labs.fasting_blood_sugar_mg_dl),
            smoking: answer(h.smoking),
            diabetes: answer(h.diabetes),
            hypertension: answer(h.hypertension),
            obesity: answer(h.obesity),
            previous_heart_attack: answer(h.previous_heart_attack),
            previous_stroke: answer(h.previous_stroke),
            family_history: answer(h.family_history),
            coronary_artery_disease: answer(h.coronary_artery_disease),
            heart_failure: answer(h.heart_failure),
            chest_pain: answer(s.chest_pain),
            shortness_of_breath: answer(s.shortness_of_breath),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::baseline_input;

    #[test]
    fn test_valid_input_builds_record() {
        let record = PatientRecord::try_from(baseline_input()).expect("Should validate");
        assert_eq!(record.age(), 50);
        assert_eq!(record.gender(), Gender::Female);
        assert_eq!(record.vitals().systolic_bp, 120);
        assert!(!record.history().smoking);
        assert!(!record.symptoms().chest_pain);
    }

    #[test]
    fn test_answers_are_case_insensitive() {
        let input = PatientInput {
            smoking: Some("yes".to_string()),
            gender: Some(" MALE ".to_string()),
            ..baseline_input()
        };
        let record = PatientRecord::try_from(input).expect("Should validate");
        assert!(record.history().smoking);
        assert_eq!(record.gender(), Gender::Male);
    }

    #[test]
    fn test_missing_flag_is_rejected() {
        let input = PatientInput {
            diabetes: None,
            ..baseline_input()
        };
        let errors = PatientRecord::try_from(input).expect_err("Missing flag must fail");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.errors()[0],
            FieldError::Missing { field: "diabetes" }
        );
    }

    #[test]
    fn test_out_of_range_values_are_not_clamped() {
        let input = PatientInput {
            cholesterol_mg_dl: Some(650.0),
            age: Some(10),
            ..baseline_input()
        };
        let errors = PatientRecord::try_from(input).expect_err("Should reject");
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_field("age"));
        assert!(errors.errors().contains(&FieldError::OutOfRange {
            field: "cholesterol_mg_dl",
            value: 650.0,
            min: 100.0,
            max: 500.0,
        }));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let input = PatientInput {
            age: Some(120),
            systolic_bp: Some(70),
            diastolic_bp: Some(150),
            weight_kg: Some(30.0),
            height_cm: Some(250.0),
            ..baseline_input()
        };
        assert!(PatientRecord::try_from(input).is_ok());
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let input = PatientInput {
            weight_kg: Some(f64::NAN),
            ..baseline_input()
        };
        let errors = PatientRecord::try_from(input).expect_err("NaN must fail");
        assert!(matches!(
            errors.errors()[0],
            FieldError::NotFinite { field: "weight_kg", .. }
        ));
    }

    #[test]
    fn test_unknown_choice_is_rejected() {
        let input = PatientInput {
            chest_pain: Some("Sometimes".to_string()),
            gender: Some("Unknown".to_string()),
            ..baseline_input()
        };
        let errors = PatientRecord::try_from(input).expect_err("Should reject");
        assert!(errors.contains_field("chest_pain"));
        assert!(errors.contains_field("gender"));
        let message = errors.to_string();
        assert!(message.contains("Sometimes"));
        assert!(message.contains("; "));
    }

    #[test]
    fn test_empty_input_reports_every_field() {
        let errors = PatientRecord::try_from(PatientInput::default()).expect_err("Should reject");
        assert_eq!(errors.len(), 19);
    }

    #[test]
    fn test_record_converts_back_to_input() {
        let original = baseline_input();
        let record = PatientRecord::try_from(original.clone()).expect("Should validate");
        assert_eq!(PatientInput::from(&record), original);
    }

    #[test]
    fn test_form_aliases_deserialize() {
        let json = r#"{"age": 50, "gender": "Male", "weight": 70.0, "height": 170.0,
            "systolic_bp": 120, "diastolic_bp": 80, "cholesterol": 180.0, "blood_sugar": 100.0}"#;
        let input: PatientInput = serde_json::from_str(json).expect("Should parse");
        assert_eq!(input.weight_kg, Some(70.0));
        assert_eq!(input.fasting_blood_sugar_mg_dl, Some(100.0));
        assert!(input.smoking.is_none());
    }
}
