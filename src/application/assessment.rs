//! Assessment service: runs the rule engine for one patient.
//!
//! This service coordinates:
//! - Optional scan classification through the `ScanClassifier` port
//! - Risk scoring and disease prediction
//! - Clinical flagging, lifestyle advice and BMI
//!
//! It holds no patient state. Each call receives its record and finding
//! explicitly and returns fresh values.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    analyze_vitals_and_labs, lifestyle_recommendations, predict_diseases, score_risk,
    unmerged_conditions, BmiReport, ClinicalFlag, DiseasePredictions, LifestyleRecommendation,
    PatientRecord, RiskScoreSet, ScanFinding,
};
use crate::ports::ScanClassifier;
use crate::CardioriskError;

/// Everything the engine derives for one patient.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub risk_scores: RiskScoreSet,
    pub disease_predictions: DiseasePredictions,
    pub clinical_flags: Vec<ClinicalFlag>,
    pub lifestyle: Vec<LifestyleRecommendation>,
    pub bmi: BmiReport,
    /// Finding merged into the predictions, if a scan was supplied.
    pub scan_finding: Option<ScanFinding>,
    pub assessed_at: DateTime<Utc>,
}

/// Service for running risk assessments.
pub struct AssessmentService<C>
where
    C: ScanClassifier,
{
    classifier: Arc<C>,
}

impl<C> AssessmentService<C>
where
    C: ScanClassifier,
{
    /// Create a new assessment service.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Classify a scan through the configured classifier.
    ///
    /// # Errors
    /// Propagates the classifier's error.
    pub fn classify_scan(&self, scan: &[u8]) -> Result<ScanFinding, CardioriskError> {
        tracing::debug!("Classifying scan with {} classifier", self.classifier.name());
        let finding = self.classifier.classify(scan)?;
        tracing::debug!("Classifier reported {} conditions", finding.len());
        Ok(finding)
    }

    /// Run the full assessment for a validated record.
    ///
    /// Total over its inputs: once the record and finding exist, nothing
    /// here can fail.
    #[must_use]
    pub fn assess(&self, record: &PatientRecord, scan: Option<&ScanFinding>) -> Assessment {
        tracing::info!(
            "Starting assessment (scan finding: {})",
            if scan.is_some() { "present" } else { "absent" }
        );

        tracing::debug!("Step 1: Scoring risk factors...");
        let risk_scores = score_risk(record);

        tracing::debug!("Step 2: Predicting diseases...");
        if let Some(scan) = scan {
            for condition in scan.unknown_conditions() {
                tracing::debug!(
                    "Scan condition {:?} is not a standard classifier output",
                    condition
                );
            }
            for condition in unmerged_conditions(scan) {
                tracing::warn!("Scan condition {:?} has no disease prediction; ignored", condition);
            }
        }
        let disease_predictions = predict_diseases(&risk_scores, scan);

        tracing::debug!("Step 3: Analyzing vitals and labs...");
        let clinical_flags = analyze_vitals_and_labs(record);

        tracing::debug!("Step 4: Lifestyle and BMI...");
        let lifestyle = lifestyle_recommendations(record);
        let bmi = record.bmi();

        tracing::info!(
            "Assessment complete: {} significant findings, {} clinical flags, {} lifestyle items",
            disease_predictions.significant().count(),
            clinical_flags.len(),
            lifestyle.len()
        );

        Assessment {
            risk_scores,
            disease_predictions,
            clinical_flags,
            lifestyle,
            bmi,
            scan_finding: scan.cloned(),
            assessed_at: Utc::now(),
        }
    }

    /// Classify `scan` (when given) and then assess.
    ///
    /// The finding is fully resolved before prediction runs.
    ///
    /// # Errors
    /// Returns the classifier's error; the assessment itself cannot fail.
    pub fn assess_with_scan(
        &self,
        record: &PatientRecord,
        scan: Option<&[u8]>,
    ) -> Result<Assessment, CardioriskError> {
        let finding = scan.map(|bytes| self.classify_scan(bytes)).transpose()?;
        Ok(self.assess(record, finding.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::placeholder::PlaceholderScanClassifier;
    use crate::domain::{Condition, Disease, PatientInput};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` and return everything logged at `warn` or above.
    fn capture_warnings(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = logs.0.lock().expect("log buffer").clone();
        String::from_utf8(bytes).expect("utf8 logs")
    }

    fn create_test_service() -> AssessmentService<PlaceholderScanClassifier> {
        AssessmentService::new(Arc::new(PlaceholderScanClassifier::new()))
    }

    fn smoker() -> PatientRecord {
        let input: PatientInput = serde_json::from_str(
            r#"{
                "age": 58, "gender": "Male", "weight_kg": 95.0, "height_cm": 178.0,
                "systolic_bp": 138, "diastolic_bp": 85,
                "cholesterol_mg_dl": 210.0, "fasting_blood_sugar_mg_dl": 98.0,
                "smoking": "Yes", "diabetes": "No", "hypertension": "No", "obesity": "No",
                "previous_heart_attack": "No", "previous_stroke": "No", "family_history": "Yes",
                "coronary_artery_disease": "No", "heart_failure": "No",
                "chest_pain": "Yes", "shortness_of_breath": "No"
            }"#,
        )
        .expect("Should parse");
        PatientRecord::try_from(input).expect("Should validate")
    }

    #[test]
    fn test_assessment_without_scan() {
        let service = create_test_service();
        let assessment = service.assess(&smoker(), None);

        assert_eq!(assessment.risk_scores.get(Condition::HeartAttack), 45);
        assert_eq!(assessment.risk_scores.get(Condition::CardiacArrest), 15);
        assert_eq!(assessment.disease_predictions.significant().count(), 0);
        assert!(assessment.clinical_flags.is_empty());
        assert_eq!(assessment.lifestyle.len(), 1);
        assert!(assessment.scan_finding.is_none());
    }

    #[test]
    fn test_assessment_with_scan_bytes() {
        let service = create_test_service();
        let assessment = service
            .assess_with_scan(&smoker(), Some(b"fake-image".as_slice()))
            .expect("Should assess");

        let cad = assessment
            .disease_predictions
            .get(Disease::CoronaryArteryDisease);
        assert!((cad.probability - 75.0).abs() < 1e-9);
        assert!(assessment.scan_finding.is_some());
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let service = create_test_service();
        let result = service.assess_with_scan(&smoker(), Some(&[][..]));
        assert!(matches!(result, Err(CardioriskError::Classifier(_))));
    }

    #[test]
    fn test_ignored_scan_conditions_warn() {
        let service = create_test_service();
        let record = smoker();
        let finding = ScanFinding::from_pairs([("Heart Failure", 0.9), ("Cardiomegaly", 0.45)])
            .expect("valid");

        let logs = capture_warnings(|| {
            let assessment = service.assess(&record, Some(&finding));
            let hf = assessment.disease_predictions.get(Disease::HeartFailure);
            assert!((hf.probability - 90.0).abs() < 1e-9);
        });

        assert!(logs.contains("WARN"));
        assert!(logs.contains(r#""Cardiomegaly" has no disease prediction"#));
        assert!(!logs.contains("Heart Failure"));
    }

    #[test]
    fn test_merged_scan_conditions_do_not_warn() {
        let service = create_test_service();
        let record = smoker();
        let finding = ScanFinding::from_pairs([("Coronary Artery Disease", 0.75)]).expect("valid");

        let logs = capture_warnings(|| {
            let _ = service.assess(&record, Some(&finding));
            let _ = service.assess(&record, None);
        });
        assert!(logs.is_empty(), "unexpected warnings: {logs}");
    }

    #[test]
    fn test_assessment_serializes() {
        let service = create_test_service();
        let assessment = service.assess(&smoker(), None);
        let json = serde_json::to_value(&assessment).expect("Should serialize");

        assert_eq!(json["risk_scores"]["Heart Attack"], 45);
        assert!(json["disease_predictions"]["Coronary Artery Disease"].is_object());
        assert_eq!(json["lifestyle"][0]["category"], "Smoking");
    }
}
