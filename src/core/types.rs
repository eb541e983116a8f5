//! Request-scoped data model shared by every scoring component.
//!
//! JSON field names match the wire format exactly: a single flat object carries
//! the environmental reading, the patient profile and the symptom state. Each
//! field falls back to the same default a client form would submit.

use super::errors::{Error, Result};
use crate::aqi::pm25_to_us_aqi;
use serde::{Deserialize, Serialize};

/// How much time the patient spends outdoors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutdoorExposure {
    #[default]
    Low,
    Medium,
    High,
}

impl OutdoorExposure {
    /// Additive environmental risk for time spent outside.
    pub fn risk_bonus(self) -> f64 {
        match self {
            OutdoorExposure::Low => 0.0,
            OutdoorExposure::Medium => 2.0,
            OutdoorExposure::High => 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoughType {
    #[default]
    Dry,
    Wet,
}

/// Air quality and weather at the patient's location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    pub aqi: f64,
    #[serde(default = "default_pm25")]
    pub pm25: f64,
    #[serde(default = "default_pm10")]
    pub pm10: f64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_humidity")]
    pub humidity: f64,
}

impl EnvironmentalReading {
    pub fn new(aqi: f64, pm25: f64, pm10: f64) -> Self {
        Self {
            aqi,
            pm25,
            pm10,
            temperature: default_temperature(),
            humidity: default_humidity(),
        }
    }

    /// AQI clamped to be non-negative, the only form the scorers consume.
    pub fn clamped_aqi(&self) -> f64 {
        self.aqi.max(0.0)
    }
}

/// Medical background of the patient. Immutable for the lifetime of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
    #[serde(default = "default_age")]
    pub age: u32,
    #[serde(default)]
    pub smoking: bool,
    #[serde(default)]
    pub cigarettes_per_day: u32,
    #[serde(default)]
    pub asthma: bool,
    #[serde(default)]
    pub copd: bool,
    #[serde(default)]
    pub previous_infection: bool,
    #[serde(default)]
    pub outdoor_exposure: OutdoorExposure,
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            age: default_age(),
            smoking: false,
            cigarettes_per_day: 0,
            asthma: false,
            copd: false,
            previous_infection: false,
            outdoor_exposure: OutdoorExposure::Low,
        }
    }
}

/// Current symptoms. Severities are 0-10 and checked by the caller, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomState {
    #[serde(default)]
    pub cough_severity: f64,
    #[serde(default)]
    pub cough_type: CoughType,
    #[serde(default)]
    pub symptoms_duration_days: u32,
    #[serde(default)]
    pub breathlessness_severity: f64,
    #[serde(default)]
    pub wheezing: bool,
    #[serde(default = "default_spo2")]
    pub spo2: f64,
    #[serde(default)]
    pub fever: bool,
    #[serde(default)]
    pub chest_pain: bool,
}

impl Default for SymptomState {
    fn default() -> Self {
        Self {
            cough_severity: 0.0,
            cough_type: CoughType::Dry,
            symptoms_duration_days: 0,
            breathlessness_severity: 0.0,
            wheezing: false,
            spo2: default_spo2(),
            fever: false,
            chest_pain: false,
        }
    }
}

/// Replacement values for the four metrics the weekly simulator varies.
///
/// Any field left `None` is read from the canonical reading or symptom state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricOverrides {
    pub aqi: Option<f64>,
    pub spo2: Option<f64>,
    pub cough_severity: Option<f64>,
    pub breathlessness_severity: Option<f64>,
}

/// Flat request body for both the single-point assessment and the weekly report.
///
/// `aqi` may be omitted, in which case it is derived from `pm25`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub aqi: Option<f64>,
    #[serde(default = "default_pm25")]
    pub pm25: f64,
    #[serde(default = "default_pm10")]
    pub pm10: f64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_humidity")]
    pub humidity: f64,
    #[serde(flatten)]
    pub profile: PatientProfile,
    #[serde(flatten)]
    pub symptoms: SymptomState,
}

impl AssessmentRequest {
    /// Environmental reading with the AQI derived from PM2.5 when absent and
    /// floored at zero before any scorer or the simulator sees it.
    pub fn environment(&self) -> EnvironmentalReading {
        let reading = EnvironmentalReading {
            aqi: self
                .aqi
                .unwrap_or_else(|| f64::from(pm25_to_us_aqi(self.pm25))),
            pm25: self.pm25,
            pm10: self.pm10,
            temperature: self.temperature,
            humidity: self.humidity,
        };
        EnvironmentalReading {
            aqi: reading.clamped_aqi(),
            ..reading
        }
    }

    /// Boundary range check. The scoring core assumes these hold and does
    /// no recovery of its own.
    pub fn validate(&self) -> Result<()> {
        if let Some(aqi) = self.aqi {
            check_finite("aqi", aqi)?;
        }
        check_range("pm25", self.pm25, 0.0, f64::MAX)?;
        check_range("pm10", self.pm10, 0.0, f64::MAX)?;
        check_finite("temperature", self.temperature)?;
        check_range("humidity", self.humidity, 0.0, 100.0)?;
        check_range("cough_severity", self.symptoms.cough_severity, 0.0, 10.0)?;
        check_range(
            "breathlessness_severity",
            self.symptoms.breathlessness_severity,
            0.0,
            10.0,
        )?;
        check_range("spo2", self.symptoms.spo2, 0.0, 100.0)
    }
}

fn check_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("{field} must be a finite number")))
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    check_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else if max == f64::MAX {
        Err(Error::InvalidInput(format!(
            "{field} must be at least {min}, got {value}"
        )))
    } else {
        Err(Error::InvalidInput(format!(
            "{field} must be between {min} and {max}, got {value}"
        )))
    }
}

fn default_pm25() -> f64 {
    45.0
}

fn default_pm10() -> f64 {
    80.0
}

fn default_temperature() -> f64 {
    28.5
}

fn default_humidity() -> f64 {
    60.0
}

fn default_age() -> u32 {
    30
}

fn default_spo2() -> f64 {
    98.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flat_request_deserializes_all_sections() {
        let json = r#"{
            "aqi": 180, "pm25": 90.5, "pm10": 140, "temperature": 31, "humidity": 70,
            "age": 67, "smoking": true, "cigarettes_per_day": 12, "asthma": false,
            "copd": true, "previous_infection": false, "outdoor_exposure": "High",
            "cough_severity": 6, "cough_type": "Wet", "symptoms_duration_days": 8,
            "breathlessness_severity": 4, "wheezing": true, "spo2": 93,
            "fever": false, "chest_pain": true
        }"#;

        let request: AssessmentRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.aqi, Some(180.0));
        assert_eq!(request.profile.age, 67);
        assert_eq!(request.profile.outdoor_exposure, OutdoorExposure::High);
        assert_eq!(request.symptoms.cough_type, CoughType::Wet);
        assert_eq!(request.symptoms.spo2, 93.0);
        assert!(request.symptoms.chest_pain);
    }

    #[test]
    fn test_missing_fields_take_client_defaults() {
        let request: AssessmentRequest = serde_json::from_str(r#"{"aqi": 100}"#).unwrap();

        assert_eq!(request.pm25, 45.0);
        assert_eq!(request.pm10, 80.0);
        assert_eq!(request.profile, PatientProfile::default());
        assert_eq!(request.symptoms, SymptomState::default());
    }

    #[test]
    fn test_missing_aqi_is_derived_from_pm25() {
        let request: AssessmentRequest = serde_json::from_str(r#"{"pm25": 24.0}"#).unwrap();

        assert_eq!(request.environment().aqi, 75.0);
    }

    #[test]
    fn test_clamped_aqi_never_negative() {
        let reading = EnvironmentalReading::new(-25.0, 10.0, 10.0);
        assert_eq!(reading.clamped_aqi(), 0.0);
    }

    #[test]
    fn test_negative_request_aqi_is_floored_in_environment() {
        let request: AssessmentRequest =
            serde_json::from_str(r#"{"aqi": -120, "pm25": 30}"#).unwrap();
        assert!(request.validate().is_ok());

        let environment = request.environment();
        assert_eq!(environment.aqi, 0.0);
        assert_eq!(environment.pm25, 30.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_severity() {
        let mut request: AssessmentRequest = serde_json::from_str(r#"{"aqi": 100}"#).unwrap();
        assert!(request.validate().is_ok());

        request.symptoms.cough_severity = 11.0;
        let err = request.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: cough_severity must be between 0 and 10, got 11"
        );
    }

    #[test]
    fn test_validate_rejects_negative_particulates() {
        let request: AssessmentRequest =
            serde_json::from_str(r#"{"aqi": 100, "pm10": -1}"#).unwrap();
        assert!(matches!(request.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_exposure_is_rejected() {
        let result = serde_json::from_str::<PatientProfile>(r#"{"outdoor_exposure": "Extreme"}"#);
        assert!(result.is_err());
    }
}
