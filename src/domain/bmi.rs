//! Body mass index calculation and weight categories.

use serde::Serialize;

/// Weight category for a BMI value. Each band includes its lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    /// Below 18.5
    Underweight,
    /// 18.5 up to 25.0
    Normal,
    /// 25.0 up to 30.0
    Overweight,
    /// 30.0 and above
    Obese,
}

impl BmiCategory {
    /// Category for an already rounded BMI value.
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Short guidance shown next to the category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Underweight => "Consider nutritional counseling",
            Self::Normal => "Maintain healthy lifestyle",
            Self::Overweight => "Consider weight management strategies",
            Self::Obese => "Consult healthcare provider for weight management",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Underweight => write!(f, "Underweight"),
            Self::Normal => write!(f, "Normal weight"),
            Self::Overweight => write!(f, "Overweight"),
            Self::Obese => write!(f, "Obese"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiReport {
    pub value: f64,
    pub category: BmiCategory,
}

impl BmiReport {
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        Self {
            value,
            category: BmiCategory::from_bmi(value),
        }
    }
}

/// BMI as weight / height², rounded to one decimal place.
///
/// Rounding is half-up (ties away from zero) on the value scaled by ten, so
/// 24.25 becomes 24.3 where banker's rounding would give 24.2.
#[must_use]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_to_tenth(weight_kg / (height_m * height_m))
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
