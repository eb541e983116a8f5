//! Aggregates over a simulated week.

use super::simulator::{DailySeries, DailySnapshot};
use crate::core::mean;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SpO2 below this counts as a drop.
pub const SPO2_DROP_THRESHOLD: f64 = 95.0;
/// Weekly mean SpO2 below this makes low oxygen the dominant symptom.
const LOW_OXYGEN_THRESHOLD: f64 = 94.0;
/// Mean severity needed for a symptom to be called dominant.
const SYMPTOM_FLOOR: f64 = 2.0;
/// Risk-point change between the first and last three days that counts as a trend.
const TREND_THRESHOLD: f64 = 5.0;
const TREND_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighestSymptom {
    #[serde(rename = "Low Oxygen (SpO2)")]
    LowOxygen,
    Cough,
    Breathlessness,
    None,
}

impl HighestSymptom {
    pub fn label(self) -> &'static str {
        match self {
            Self::LowOxygen => "Low Oxygen (SpO2)",
            Self::Cough => "Cough",
            Self::Breathlessness => "Breathlessness",
            Self::None => "None",
        }
    }

    pub fn is_respiratory(self) -> bool {
        matches!(self, Self::Cough | Self::Breathlessness)
    }
}

impl fmt::Display for HighestSymptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Increasing => "Increasing",
            Trend::Decreasing => "Decreasing",
            Trend::Stable => "Stable",
        };
        f.write_str(label)
    }
}

/// Weekly average risk tier. Boundary values fall into the lower tier:
/// 30 is Low and 60 is Moderate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AverageRiskLevel {
    Low,
    Moderate,
    High,
}

impl AverageRiskLevel {
    pub fn from_average(avg_risk: f64) -> Self {
        if avg_risk > 60.0 {
            Self::High
        } else if avg_risk > 30.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for AverageRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAggregates {
    pub avg_aqi: f64,
    pub avg_spo2: f64,
    pub avg_cough: f64,
    pub avg_breathlessness: f64,
    pub avg_risk: f64,
    pub highest_symptom: HighestSymptom,
    pub avg_risk_level: AverageRiskLevel,
    pub trend: Trend,
    /// Daily SpO2 readings below 95, in day order.
    pub spo2_drops: Vec<f64>,
    pub daily_risks: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, series: &DailySeries) -> TrendAggregates {
        let spo2_values = column(series, |s| s.spo2);
        let daily_risks = column(series, |s| s.risk_percentage);

        let avg_aqi = mean(&column(series, |s| s.aqi));
        let avg_spo2 = mean(&spo2_values);
        let avg_cough = mean(&column(series, |s| s.cough_severity));
        let avg_breathlessness = mean(&column(series, |s| s.breathlessness_severity));
        let avg_risk = mean(&daily_risks);

        TrendAggregates {
            avg_aqi,
            avg_spo2,
            avg_cough,
            avg_breathlessness,
            avg_risk,
            highest_symptom: dominant_symptom(avg_spo2, avg_cough, avg_breathlessness),
            avg_risk_level: AverageRiskLevel::from_average(avg_risk),
            trend: classify_trend(&daily_risks),
            spo2_drops: spo2_values
                .into_iter()
                .filter(|spo2| *spo2 < SPO2_DROP_THRESHOLD)
                .collect(),
            daily_risks,
        }
    }
}

fn column(series: &DailySeries, metric: impl Fn(&DailySnapshot) -> f64) -> Vec<f64> {
    series.iter().map(metric).collect()
}

/// Low oxygen outranks everything; otherwise the stronger of cough and
/// breathlessness, provided it averages at least 2.
pub fn dominant_symptom(avg_spo2: f64, avg_cough: f64, avg_breathlessness: f64) -> HighestSymptom {
    if avg_spo2 < LOW_OXYGEN_THRESHOLD {
        HighestSymptom::LowOxygen
    } else if avg_cough > avg_breathlessness && avg_cough >= SYMPTOM_FLOOR {
        HighestSymptom::Cough
    } else if avg_breathlessness >= SYMPTOM_FLOOR {
        HighestSymptom::Breathlessness
    } else {
        HighestSymptom::None
    }
}

/// Compares the mean of the first three days against the last three.
pub fn classify_trend(daily_risks: &[f64]) -> Trend {
    if daily_risks.len() < TREND_WINDOW {
        return Trend::Stable;
    }
    let early = mean(&daily_risks[..TREND_WINDOW]);
    let late = mean(&daily_risks[daily_risks.len() - TREND_WINDOW..]);
    let delta = late - early;

    if delta > TREND_THRESHOLD {
        Trend::Increasing
    } else if delta < -TREND_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}
