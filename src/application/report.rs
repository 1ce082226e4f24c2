//! Plain-text rendering of an assessment.

use std::fmt::Write;

use crate::application::Assessment;
use crate::domain::ScanBand;

/// Render an assessment as a sectioned plain-text report.
#[must_use]
pub fn render_text(assessment: &Assessment) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, assessment);
    out
}

fn write_report(out: &mut String, a: &Assessment) -> std::fmt::Result {
    writeln!(out, "Heart Disease Risk Assessment")?;
    writeln!(out, "Assessed at {}", a.assessed_at.format("%Y-%m-%d %H:%M:%S UTC"))?;

    if let Some(scan) = &a.scan_finding {
        writeln!(out, "\n== Scan Analysis Results ==")?;
        for (condition, probability) in scan.iter() {
            let band = match ScanBand::from_probability(probability) {
                ScanBand::High => "high",
                ScanBand::Elevated => "elevated",
                ScanBand::Low => "low",
            };
            writeln!(out, "{condition}: {:.1}% ({band})", probability * 100.0)?;
        }
    }

    writeln!(out, "\n== Disease Probability Analysis ==")?;
    let mut any = false;
    for prediction in a.disease_predictions.significant() {
        any = true;
        writeln!(
            out,
            "{} - {} Probability",
            prediction.disease,
            prediction.probability_label()
        )?;
        if !prediction.key_factors.is_empty() {
            writeln!(out, "  Key Risk Factors:")?;
            for factor in &prediction.key_factors {
                writeln!(out, "    • {factor}")?;
            }
        }
        if !prediction.recommendations.is_empty() {
            writeln!(out, "  Recommendations:")?;
            for rec in &prediction.recommendations {
                writeln!(out, "    • {rec}")?;
            }
        }
    }
    if !any {
        writeln!(out, "No disease-specific findings.")?;
    }

    writeln!(out, "\n== General Risk Assessment ==")?;
    for (condition, score) in a.risk_scores.iter() {
        writeln!(
            out,
            "{condition}: {score}% - {} Risk",
            a.risk_scores.level(condition)
        )?;
    }

    writeln!(out, "\n== Clinical Analysis ==")?;
    if a.clinical_flags.is_empty() {
        writeln!(out, "All vitals and labs within normal limits.")?;
    }
    for flag in &a.clinical_flags {
        writeln!(out, "{} Analysis", flag.parameter)?;
        writeln!(out, "  Value: {}", flag.value)?;
        writeln!(out, "  Status: {}", flag.status)?;
        writeln!(out, "  Risk Level: {}", flag.risk_level)?;
        writeln!(out, "  Recommendation: {}", flag.recommendation)?;
    }

    writeln!(out, "\n== BMI Analysis ==")?;
    writeln!(out, "Your BMI: {:.1}", a.bmi.value)?;
    writeln!(out, "{} - {}", a.bmi.category, a.bmi.category.advice())?;

    writeln!(out, "\n== Lifestyle Recommendations ==")?;
    if a.lifestyle.is_empty() {
        writeln!(out, "No specific lifestyle changes flagged.")?;
    }
    for rec in &a.lifestyle {
        writeln!(out, "{}", rec.category)?;
        writeln!(out, "  Recommendation: {}", rec.recommendation)?;
        writeln!(out, "  Details: {}", rec.details)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::json_input::parse_patient;
    use crate::adapters::placeholder::PlaceholderScanClassifier;
    use crate::application::AssessmentService;
    use std::sync::Arc;

    const HIGH_RISK: &str = r#"{
        "age": 70, "gender": "Female", "weight": 70.0, "height": 170.0,
        "systolic_bp": 150, "diastolic_bp": 95,
        "cholesterol": 220.0, "blood_sugar": 110.0,
        "smoking": "Yes", "diabetes": "Yes", "hypertension": "Yes", "obesity": "Yes",
        "previous_heart_attack": "No", "previous_stroke": "No", "family_history": "Yes",
        "coronary_artery_disease": "No", "heart_failure": "No",
        "chest_pain": "No", "shortness_of_breath": "No"
    }"#;

    #[test]
    fn test_report_sections() {
        let service = AssessmentService::new(Arc::new(PlaceholderScanClassifier::new()));
        let record = parse_patient(HIGH_RISK).expect("Should parse");
        let report = render_text(&service.assess(&record, None));

        assert!(report.contains("Myocardial Infarction - 95.0% Probability"));
        assert!(report.contains("Heart Failure - 65.0% Probability"));
        assert!(!report.contains("Coronary Artery Disease -"));
        assert!(report.contains("Heart Attack: 95% - High Risk"));
        assert!(report.contains("Cardiac Arrest: 0% - Low Risk"));
        assert!(report.contains("Blood Pressure Analysis"));
        assert!(report.contains("Value: 150/95"));
        assert!(report.contains("Your BMI: 24.2"));
        assert!(report.contains("Normal weight - Maintain healthy lifestyle"));
        assert!(report.contains("Weight Management"));
        assert!(!report.contains("Scan Analysis Results"));
    }

    #[test]
    fn test_report_includes_scan() {
        let service = AssessmentService::new(Arc::new(PlaceholderScanClassifier::new()));
        let record = parse_patient(HIGH_RISK).expect("Should parse");
        let assessment = service
            .assess_with_scan(&record, Some(b"scan".as_slice()))
            .expect("Should assess");
        let report = render_text(&assessment);

        assert!(report.contains("Coronary Artery Disease: 75.0% (high)"));
        assert!(report.contains("Pleural Effusion: 20.0% (low)"));
        assert!(report.contains("Coronary Artery Disease - 75.0% Probability"));
    }
}
