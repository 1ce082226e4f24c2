//! Lifestyle recommendations from qualitative risk flags.

use serde::Serialize;

use crate::domain::patient::PatientRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LifestyleCategory {
    Smoking,
    WeightManagement,
}

impl std::fmt::Display for LifestyleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Smoking => write!(f, "Smoking"),
            Self::WeightManagement => write!(f, "Weight Management"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifestyleRecommendation {
    pub category: LifestyleCategory,
    pub recommendation: &'static str,
    pub details: &'static str,
}

/// Recommendations for smoking, then obesity.
#[must_use]
pub fn lifestyle_recommendations(record: &PatientRecord) -> Vec<LifestyleRecommendation> {
    let history = record.history();
    let mut recommendations = Vec::new();

    if history.smoking {
        recommendations.push(LifestyleRecommendation {
            category: LifestyleCategory::Smoking,
            recommendation: "Consider smoking cessation programs",
            details: "Smoking significantly increases cardiovascular risk",
        });
    }

    if history.obesity {
        recommendations.push(LifestyleRecommendation {
            category: LifestyleCategory::WeightManagement,
            recommendation: "Consider weight management program",
            details: "Weight loss can significantly improve heart health",
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{record_with, yes};

    #[test]
    fn test_no_flags_no_recommendations() {
        assert!(lifestyle_recommendations(&record_with(|_| {})).is_empty());
    }

    #[test]
    fn test_smoking_before_weight_management() {
        let record = record_with(|p| {
            p.obesity = yes();
            p.smoking = yes();
        });
        let recs = lifestyle_recommendations(&record);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].category, LifestyleCategory::Smoking);
        assert_eq!(recs[1].category, LifestyleCategory::WeightManagement);
        assert_eq!(recs[1].recommendation, "Consider weight management program");
    }

    #[test]
    fn test_other_flags_do_not_trigger() {
        let record = record_with(|p| {
            p.diabetes = yes();
            p.hypertension = yes();
        });
        assert!(lifestyle_recommendations(&record).is_empty());
    }
}
