//! Fixture builders for common test inputs.
//!
//! | Helper | Purpose |
//! |--------|---------|
//! | [`polluted_elderly_smoker_request`] | AQI 300, smoker aged 70, no symptoms (lung risk 60) |
//! | [`asthmatic_request`] | Moderate air, asthmatic with cough and breathlessness |
//! | [`smoker_request`] | Clean air, heavy smoker |
//! | [`aggregates_fixture`] | Flat week with a chosen mean AQI and SpO2 drops |
//! | [`valid_remote_payload`] | A collaborator answer that passes validation |

use crate::core::{AssessmentRequest, OutdoorExposure, PatientProfile, SymptomState};
use crate::weekly::trend::{AverageRiskLevel, HighestSymptom, Trend, TrendAggregates};

fn request(
    aqi: f64,
    pm25: f64,
    pm10: f64,
    profile: PatientProfile,
    symptoms: SymptomState,
) -> AssessmentRequest {
    AssessmentRequest {
        aqi: Some(aqi),
        pm25,
        pm10,
        temperature: 28.5,
        humidity: 60.0,
        profile,
        symptoms,
    }
}

pub fn polluted_elderly_smoker_request() -> AssessmentRequest {
    request(
        300.0,
        150.0,
        250.0,
        PatientProfile {
            age: 70,
            smoking: true,
            cigarettes_per_day: 15,
            outdoor_exposure: OutdoorExposure::High,
            ..PatientProfile::default()
        },
        SymptomState::default(),
    )
}

pub fn asthmatic_request() -> AssessmentRequest {
    request(
        140.0,
        55.0,
        90.0,
        PatientProfile {
            age: 34,
            asthma: true,
            outdoor_exposure: OutdoorExposure::Medium,
            ..PatientProfile::default()
        },
        SymptomState {
            cough_severity: 6.0,
            breathlessness_severity: 5.0,
            symptoms_duration_days: 4,
            wheezing: true,
            spo2: 94.0,
            ..SymptomState::default()
        },
    )
}

pub fn smoker_request() -> AssessmentRequest {
    request(
        60.0,
        15.0,
        30.0,
        PatientProfile {
            age: 52,
            smoking: true,
            cigarettes_per_day: 25,
            ..PatientProfile::default()
        },
        SymptomState {
            cough_severity: 3.0,
            ..SymptomState::default()
        },
    )
}

/// A steady week: SpO2 97, no symptoms, 20% risk every day.
pub fn aggregates_fixture(avg_aqi: f64, spo2_drops: &[f64]) -> TrendAggregates {
    TrendAggregates {
        avg_aqi,
        avg_spo2: 97.0,
        avg_cough: 0.0,
        avg_breathlessness: 0.0,
        avg_risk: 20.0,
        highest_symptom: HighestSymptom::None,
        avg_risk_level: AverageRiskLevel::Low,
        trend: Trend::Stable,
        spo2_drops: spo2_drops.to_vec(),
        daily_risks: vec![20.0; 7],
    }
}

/// Deliberately unsorted so tests can see the strategy rank it.
pub fn valid_remote_payload() -> String {
    r#"{
  "insights": ["Air quality stayed moderate for most of the week.", "Your oxygen saturation held steady."],
  "disease_risks": [
    {"name": "Lung Cancer", "risk_percentage": 12.0},
    {"name": "Asthma Exacerbation", "risk_percentage": 61.5},
    {"name": "COPD", "risk_percentage": 18.0},
    {"name": "Acute Bronchitis", "risk_percentage": 33.0},
    {"name": "Chronic Bronchitis", "risk_percentage": 21.0},
    {"name": "Emphysema", "risk_percentage": 9.5},
    {"name": "Respiratory Tract Infections", "risk_percentage": 40.0},
    {"name": "Pneumonia", "risk_percentage": 14.0}
  ],
  "recommendation": "Use your reliever inhaler as prescribed and limit time outdoors on high-AQI days."
}"#
    .to_string()
}
