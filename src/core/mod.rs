pub mod errors;
pub mod types;

pub use errors::{Error, InsightError, Result};
pub use types::{
    AssessmentRequest, CoughType, EnvironmentalReading, MetricOverrides, OutdoorExposure,
    PatientProfile, SymptomState,
};

/// Round `value` to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
