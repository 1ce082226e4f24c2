//! Disease-level predictions derived from risk scores and scan findings.

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::domain::risk::{Condition, RiskScoreSet};
use crate::domain::scan::ScanFinding;

/// Heart attack score above which myocardial infarction is predicted.
const MYOCARDIAL_INFARCTION_TRIGGER: u8 = 60;
/// Heart failure score above which heart failure is predicted.
const HEART_FAILURE_TRIGGER: u8 = 50;

const MYOCARDIAL_INFARCTION_FACTORS: [&str; 3] = [
    "High blood pressure",
    "Elevated cholesterol",
    "Smoking history",
];
const MYOCARDIAL_INFARCTION_RECOMMENDATIONS: [&str; 3] = [
    "Immediate medical consultation",
    "Regular ECG monitoring",
    "Lifestyle modifications",
];
const HEART_FAILURE_FACTORS: [&str; 3] = ["Previous heart conditions", "Hypertension", "Diabetes"];
const HEART_FAILURE_RECOMMENDATIONS: [&str; 3] = [
    "Regular cardiac checkups",
    "Fluid intake monitoring",
    "Salt restriction",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Disease {
    CoronaryArteryDisease,
    MyocardialInfarction,
    HeartFailure,
}

impl Disease {
    /// All diseases in reporting order.
    pub const ALL: [Disease; 3] = [
        Self::CoronaryArteryDisease,
        Self::MyocardialInfarction,
        Self::HeartFailure,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CoronaryArteryDisease => "Coronary Artery Disease",
            Self::MyocardialInfarction => "Myocardial Infarction",
            Self::HeartFailure => "Heart Failure",
        }
    }

    /// Look up a disease by its display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiseasePrediction {
    pub disease: Disease,
    /// Percentage in `0.0..=100.0`.
    pub probability: f64,
    pub key_factors: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
}

impl DiseasePrediction {
    fn empty(disease: Disease) -> Self {
        Self {
            disease,
            probability: 0.0,
            key_factors: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    fn triggered(
        disease: Disease,
        score: u8,
        factors: &[&'static str],
        recommendations: &[&'static str],
    ) -> Self {
        Self {
            disease,
            probability: f64::from(score),
            key_factors: factors.to_vec(),
            recommendations: recommendations.to_vec(),
        }
    }

    /// Probability formatted for display, e.g. `85.0%`.
    #[must_use]
    pub fn probability_label(&self) -> String {
        format!("{:.1}%", self.probability)
    }
}

impl Serialize for DiseasePrediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DiseasePrediction", 3)?;
        s.serialize_field("probability", &self.probability)?;
        s.serialize_field("key_factors", &self.key_factors)?;
        s.serialize_field("recommendations", &self.recommendations)?;
        s.end()
    }
}

/// One prediction per [`Disease`], in reporting order. Zero-probability
/// entries are kept; use [`DiseasePredictions::significant`] to filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseasePredictions {
    entries: Vec<DiseasePrediction>,
}

impl DiseasePredictions {
    #[must_use]
    pub fn get(&self, disease: Disease) -> &DiseasePrediction {
        // Entries are built from Disease::ALL, so the index always matches.
        &self.entries[disease as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiseasePrediction> {
        self.entries.iter()
    }

    /// Predictions with a probability above zero.
    pub fn significant(&self) -> impl Iterator<Item = &DiseasePrediction> {
        self.entries.iter().filter(|p| p.probability > 0.0)
    }

    fn get_mut(&mut self, disease: Disease) -> &mut DiseasePrediction {
        &mut self.entries[disease as usize]
    }
}

impl Serialize for DiseasePredictions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for prediction in &self.entries {
            map.serialize_entry(prediction.disease.name(), prediction)?;
        }
        map.end()
    }
}

/// Derive disease predictions from risk scores, optionally merged with a scan.
///
/// Rule-derived probabilities come from the heart attack and heart failure
/// scores only; coronary artery disease has no rule path and is driven by the
/// scan alone. A scan entry whose name matches a disease replaces the current
/// probability only when its scaled value is greater. Entries that match no
/// disease are ignored.
#[must_use]
pub fn predict_diseases(scores: &RiskScoreSet, scan: Option<&ScanFinding>) -> DiseasePredictions {
    let mut predictions = DiseasePredictions {
        entries: Disease::ALL.into_iter().map(DiseasePrediction::empty).collect(),
    };

    let heart_attack = scores.get(Condition::HeartAttack);
    if heart_attack > MYOCARDIAL_INFARCTION_TRIGGER {
        *predictions.get_mut(Disease::MyocardialInfarction) = DiseasePrediction::triggered(
            Disease::MyocardialInfarction,
            heart_attack,
            &MYOCARDIAL_INFARCTION_FACTORS,
            &MYOCARDIAL_INFARCTION_RECOMMENDATIONS,
        );
    }

    let heart_failure = scores.get(Condition::HeartFailure);
    if heart_failure > HEART_FAILURE_TRIGGER {
        *predictions.get_mut(Disease::HeartFailure) = DiseasePrediction::triggered(
            Disease::HeartFailure,
            heart_failure,
            &HEART_FAILURE_FACTORS,
            &HEART_FAILURE_RECOMMENDATIONS,
        );
    }

    if let Some(scan) = scan {
        for (condition, probability) in scan.iter() {
            let Some(disease) = Disease::from_name(condition) else {
                continue;
            };
            let prediction = predictions.get_mut(disease);
            let scaled = probability * 100.0;
            if scaled > prediction.probability {
                prediction.probability = scaled;
            }
        }
    }

    predictions
}

/// Scan conditions that [`predict_diseases`] does not merge.
pub fn unmerged_conditions(scan: &ScanFinding) -> impl Iterator<Item = &str> {
    scan.iter()
        .map(|(name, _)| name)
        .filter(|name| Disease::from_name(name).is_none())
}
