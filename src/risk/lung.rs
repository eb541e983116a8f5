//! Composite lung-infection risk from environment, medical profile and symptoms.
//!
//! The total is the sum of three independently scored components, capped at 100:
//!
//! - **Environment**: AQI, PM2.5 and PM10 each saturate at their own ceiling
//!   (15, 10, 5), plus a bonus for outdoor exposure.
//! - **Profile**: fixed increments for age, smoking habit and chronic conditions.
//! - **Symptoms**: severity-weighted cough and breathlessness, plus increments for
//!   cough type, duration, wheezing, fever, chest pain and low SpO2.
//!
//! The model is a pure function of its inputs. Optional [`MetricOverrides`]
//! replay alternate values for AQI, SpO2, cough and breathlessness without
//! touching the caller's reading or symptom state.

use crate::aqi::AqiCategory;
use crate::core::{
    round_to, AssessmentRequest, CoughType, EnvironmentalReading, MetricOverrides,
    PatientProfile, SymptomState,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sub-score above this value is called out in the explanation.
const CONTRIBUTOR_THRESHOLD: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LungRiskLevel {
    Low,
    Moderate,
    High,
}

impl LungRiskLevel {
    /// `[0, 30)` Low, `[30, 60)` Moderate, `[60, 100]` High.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 30.0 {
            Self::Low
        } else if percentage < 60.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Self::Low => "Your current lung infection risk is low.",
            Self::Moderate => {
                "Your lung infection risk is moderate. Monitor your symptoms and limit exposure to polluted air."
            }
            Self::High => {
                "Your lung infection risk is high. Consider consulting a healthcare professional soon."
            }
        }
    }
}

impl fmt::Display for LungRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three component scores behind a [`RiskAssessment`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub env_risk: f64,
    pub profile_risk: f64,
    pub symptom_risk: f64,
}

impl RiskBreakdown {
    pub fn total(&self) -> f64 {
        (self.env_risk + self.profile_risk + self.symptom_risk).min(100.0)
    }

    fn contributors(&self) -> Vec<&'static str> {
        [
            (self.env_risk, "poor air quality"),
            (self.profile_risk, "underlying health vulnerabilities"),
            (self.symptom_risk, "significant current symptoms"),
        ]
        .into_iter()
        .filter(|(score, _)| *score > CONTRIBUTOR_THRESHOLD)
        .map(|(_, label)| label)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_percentage: f64,
    pub risk_level: LungRiskLevel,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub breakdown: Option<RiskBreakdown>,
}

/// Response body of a single-point assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    #[serde(flatten)]
    pub assessment: RiskAssessment,
    pub aqi: f64,
    pub aqi_category: AqiCategory,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LungRiskModel;

impl LungRiskModel {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(
        &self,
        environment: &EnvironmentalReading,
        profile: &PatientProfile,
        symptoms: &SymptomState,
        overrides: Option<&MetricOverrides>,
    ) -> RiskAssessment {
        let overrides = overrides.copied().unwrap_or_default();
        let breakdown = self.breakdown(environment, profile, symptoms, &overrides);

        let risk_percentage = round_to(breakdown.total(), 1);
        let risk_level = LungRiskLevel::from_percentage(risk_percentage);

        RiskAssessment {
            risk_percentage,
            risk_level,
            explanation: explain(risk_level, &breakdown),
            breakdown: Some(breakdown),
        }
    }

    /// Validates a flat request and assesses it without overrides.
    pub fn assess_request(
        &self,
        request: &AssessmentRequest,
    ) -> crate::core::Result<AssessmentReport> {
        request.validate()?;
        let environment = request.environment();
        let assessment = self.assess(&environment, &request.profile, &request.symptoms, None);

        Ok(AssessmentReport {
            assessment,
            aqi: environment.aqi,
            aqi_category: AqiCategory::classify(environment.aqi),
        })
    }

    pub fn breakdown(
        &self,
        environment: &EnvironmentalReading,
        profile: &PatientProfile,
        symptoms: &SymptomState,
        overrides: &MetricOverrides,
    ) -> RiskBreakdown {
        let aqi = overrides.aqi.unwrap_or(environment.aqi).max(0.0);
        let spo2 = overrides.spo2.unwrap_or(symptoms.spo2);
        let cough = overrides.cough_severity.unwrap_or(symptoms.cough_severity);
        let breathlessness = overrides
            .breathlessness_severity
            .unwrap_or(symptoms.breathlessness_severity);

        RiskBreakdown {
            env_risk: environmental_risk(aqi, environment, profile),
            profile_risk: profile_risk(profile),
            symptom_risk: symptom_risk(symptoms, spo2, cough, breathlessness),
        }
    }
}

fn environmental_risk(
    aqi: f64,
    environment: &EnvironmentalReading,
    profile: &PatientProfile,
) -> f64 {
    let aqi_part = (aqi / 300.0 * 15.0).min(15.0);
    let pm25_part = (environment.pm25 / 150.0 * 10.0).min(10.0);
    let pm10_part = (environment.pm10 / 250.0 * 5.0).min(5.0);

    aqi_part + pm25_part + pm10_part + profile.outdoor_exposure.risk_bonus()
}

fn profile_risk(profile: &PatientProfile) -> f64 {
    let mut risk = 0.0;
    if profile.age > 65 {
        risk += 10.0;
    }
    if profile.smoking {
        risk += 10.0;
        if profile.cigarettes_per_day > 10 {
            risk += 5.0;
        }
    }
    if profile.asthma {
        risk += 5.0;
    }
    if profile.copd {
        risk += 5.0;
    }
    if profile.previous_infection {
        risk += 5.0;
    }
    risk
}

fn symptom_risk(symptoms: &SymptomState, spo2: f64, cough: f64, breathlessness: f64) -> f64 {
    let mut risk = cough * 1.0 + breathlessness * 1.5;

    if symptoms.cough_type == CoughType::Wet {
        risk += 3.0;
    }
    if symptoms.symptoms_duration_days > 5 {
        risk += 2.0;
    }
    if symptoms.symptoms_duration_days > 10 {
        risk += 3.0;
    }
    if symptoms.wheezing {
        risk += 4.0;
    }
    if symptoms.fever {
        risk += 2.5;
    }
    if symptoms.chest_pain {
        risk += 2.5;
    }

    if spo2 < 92.0 {
        risk += 10.0;
    } else if spo2 < 95.0 {
        risk += 5.0;
    }

    risk
}

fn explain(level: LungRiskLevel, breakdown: &RiskBreakdown) -> String {
    let contributors = breakdown.contributors();
    if contributors.is_empty() {
        return level.summary().to_string();
    }
    format!(
        "{} This is primarily due to {}.",
        level.summary(),
        contributors.join(", ")
    )
}
