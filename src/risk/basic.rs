//! Safety-tier scoring from AQI and two wearable vitals.
//!
//! `Risk Score = AQI × 0.5 + HeartRateFactor × 0.3 + SpO2Factor × 0.2`
//!
//! | Score     | Level     |
//! |-----------|-----------|
//! | 0 – 50    | Safe      |
//! | 50 – 100  | Moderate  |
//! | above 100 | High Risk |
//!
//! The scorer never fails. Readings that are missing or not numeric are
//! replaced by resting defaults before scoring.

use crate::core::round_to;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const DEFAULT_HEART_RATE: f64 = 72.0;
pub const DEFAULT_SPO2: f64 = 98.0;
pub const DEFAULT_AQI: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicRiskLevel {
    Safe,
    Moderate,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl BasicRiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score <= 50.0 {
            Self::Safe
        } else if score <= 100.0 {
            Self::Moderate
        } else {
            Self::HighRisk
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Moderate => "Moderate",
            Self::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for BasicRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicRiskResult {
    pub risk_score: f64,
    pub risk_level: BasicRiskLevel,
    pub alert_flag: bool,
    pub preventive_suggestions: Vec<String>,
}

pub struct BasicRiskScorer {
    pub aqi_weight: f64,        // Default: 0.5
    pub heart_rate_weight: f64, // Default: 0.3
    pub spo2_weight: f64,       // Default: 0.2
}

impl Default for BasicRiskScorer {
    fn default() -> Self {
        Self {
            aqi_weight: 0.5,
            heart_rate_weight: 0.3,
            spo2_weight: 0.2,
        }
    }
}

impl BasicRiskScorer {
    pub fn score(&self, aqi: f64, heart_rate: f64, spo2: f64) -> BasicRiskResult {
        let aqi = sanitize(aqi, DEFAULT_AQI).max(0.0);
        let heart_rate = sanitize(heart_rate, DEFAULT_HEART_RATE);
        let spo2 = sanitize(spo2, DEFAULT_SPO2);

        let risk_score = round_to(
            aqi * self.aqi_weight
                + heart_rate_factor(heart_rate) * self.heart_rate_weight
                + spo2_factor(spo2) * self.spo2_weight,
            2,
        );
        let risk_level = BasicRiskLevel::from_score(risk_score);

        BasicRiskResult {
            risk_score,
            risk_level,
            alert_flag: risk_level == BasicRiskLevel::HighRisk,
            preventive_suggestions: preventive_suggestions(risk_level.label())
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Score loosely-typed JSON readings, substituting defaults for any value
    /// that is absent or cannot be read as a number.
    pub fn score_values(
        &self,
        aqi: Option<&Value>,
        heart_rate: Option<&Value>,
        spo2: Option<&Value>,
    ) -> BasicRiskResult {
        self.score(
            numeric_or(aqi, DEFAULT_AQI),
            numeric_or(heart_rate, DEFAULT_HEART_RATE),
            numeric_or(spo2, DEFAULT_SPO2),
        )
    }
}

/// 0-100 factor for deviation above a resting 60 bpm.
pub fn heart_rate_factor(heart_rate: f64) -> f64 {
    match heart_rate {
        hr if hr <= 60.0 => 0.0,
        hr if hr <= 80.0 => (hr - 60.0) * 1.0,
        hr if hr <= 100.0 => 20.0 + (hr - 80.0) * 2.0,
        hr => (60.0 + (hr - 100.0) * 4.0).min(100.0),
    }
}

/// 0-100 factor; lower saturation means higher risk.
pub fn spo2_factor(spo2: f64) -> f64 {
    match spo2 {
        sp if sp >= 98.0 => 0.0,
        sp if sp >= 95.0 => (98.0 - sp) * 10.0,
        sp if sp >= 90.0 => 30.0 + (95.0 - sp) * 14.0,
        _ => 100.0,
    }
}

/// Ordered advice for a level label. Unrecognized labels get no advice.
pub fn preventive_suggestions(level: &str) -> &'static [&'static str] {
    match level {
        "Safe" => &[
            "Air quality is good. Enjoy outdoor activities.",
            "Stay hydrated and maintain regular exercise.",
        ],
        "Moderate" => &[
            "Consider wearing a mask if outdoors for extended periods.",
            "Avoid strenuous outdoor exercise during peak pollution hours.",
            "Keep windows closed and use air purifiers indoors.",
            "Monitor your SpO2 levels periodically.",
        ],
        "High Risk" => &[
            "Stay indoors and use air purifiers immediately.",
            "Avoid all outdoor physical activity.",
            "Wear an N95 mask if you must go outside.",
            "Seek medical attention if you feel breathless or dizzy.",
            "Keep rescue inhalers accessible if you have asthma.",
        ],
        _ => &[],
    }
}

fn sanitize(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

fn numeric_or(value: Option<&Value>, default: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(default)
}
