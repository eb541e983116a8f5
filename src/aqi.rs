//! US EPA air quality index helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// EPA health category for an AQI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn classify(aqi: f64) -> Self {
        match aqi {
            a if a <= 50.0 => Self::Good,
            a if a <= 100.0 => Self::Moderate,
            a if a <= 150.0 => Self::UnhealthyForSensitiveGroups,
            a if a <= 200.0 => Self::Unhealthy,
            a if a <= 300.0 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// (concentration low, concentration high, AQI low, AQI high)
const PM25_BREAKPOINTS: [(f64, f64, f64, f64); 6] = [
    (0.0, 12.0, 0.0, 50.0),
    (12.0, 35.4, 50.0, 100.0),
    (35.4, 55.4, 100.0, 150.0),
    (55.4, 150.4, 150.0, 200.0),
    (150.4, 250.4, 200.0, 300.0),
    (250.4, 500.4, 300.0, 500.0),
];

/// Convert a PM2.5 concentration (µg/m³) to a US AQI value, truncated.
///
/// Concentrations above the last breakpoint saturate at 500.
pub fn pm25_to_us_aqi(pm25: f64) -> u32 {
    let pm25 = pm25.max(0.0);
    PM25_BREAKPOINTS
        .iter()
        .find(|(_, conc_high, ..)| pm25 <= *conc_high)
        .map(|&(conc_low, conc_high, aqi_low, aqi_high)| {
            let slope = (aqi_high - aqi_low) / (conc_high - conc_low);
            (aqi_low + slope * (pm25 - conc_low)) as u32
        })
        .unwrap_or(500)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries_are_inclusive() {
        assert_eq!(AqiCategory::classify(50.0), AqiCategory::Good);
        assert_eq!(AqiCategory::classify(50.5), AqiCategory::Moderate);
        assert_eq!(AqiCategory::classify(150.0), AqiCategory::UnhealthyForSensitiveGroups);
        assert_eq!(AqiCategory::classify(285.0), AqiCategory::VeryUnhealthy);
        assert_eq!(AqiCategory::classify(301.0), AqiCategory::Hazardous);
    }

    #[test]
    fn test_category_serializes_with_epa_label() {
        let json = serde_json::to_string(&AqiCategory::UnhealthyForSensitiveGroups).unwrap();
        assert_eq!(json, "\"Unhealthy for Sensitive Groups\"");
    }

    #[test]
    fn test_pm25_conversion_follows_breakpoints() {
        assert_eq!(pm25_to_us_aqi(0.0), 0);
        assert_eq!(pm25_to_us_aqi(3.0), 12);
        assert_eq!(pm25_to_us_aqi(24.0), 75);
        assert_eq!(pm25_to_us_aqi(60.0), 152);
    }

    #[test]
    fn test_pm25_conversion_saturates() {
        assert_eq!(pm25_to_us_aqi(600.0), 500);
        assert_eq!(pm25_to_us_aqi(-5.0), 0);
    }
}
