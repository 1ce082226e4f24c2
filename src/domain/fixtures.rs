//! Record builders shared by the domain unit tests.

use crate::domain::patient::{PatientInput, PatientRecord};

fn answer(flag: bool) -> Option<String> {
    Some(if flag { "Yes" } else { "No" }.to_string())
}

/// Healthy 50-year-old: no flags, no rule triggers.
pub fn baseline_input() -> PatientInput {
    PatientInput {
        age: Some(50),
        gender: Some("Female".to_string()),
        weight_kg: Some(70.0),
        height_cm: Some(170.0),
        systolic_bp: Some(120),
        diastolic_bp: Some(80),
        cholesterol_mg_dl: Some(180.0),
        fasting_blood_sugar_mg_dl: Some(100.0),
        smoking: answer(false),
        diabetes: answer(false),
        hypertension: answer(false),
        obesity: answer(false),
        previous_heart_attack: answer(false),
        previous_stroke: answer(false),
        family_history: answer(false),
        coronary_artery_disease: answer(false),
        heart_failure: answer(false),
        chest_pain: answer(false),
        shortness_of_breath: answer(false),
    }
}

/// Build a record from the baseline after applying `edit`.
pub fn record_with(edit: impl FnOnce(&mut PatientInput)) -> PatientRecord {
    let mut input = baseline_input();
    edit(&mut input);
    PatientRecord::try_from(input).expect("fixture must validate")
}

pub fn yes() -> Option<String> {
    answer(true)
}
