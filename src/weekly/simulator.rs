//! Synthetic seven-day history anchored on today's exact readings.
//!
//! Days are indexed `0..=6` with day 6 being today. Each earlier day perturbs
//! the four variable metrics with uniform noise scaled by
//! `(6 - day) / 6`, so the noise fades to nothing as the series approaches
//! the present. Every simulated day is scored independently by
//! [`LungRiskModel`] through [`MetricOverrides`].
//!
//! The final day is never sampled: its metrics are the caller's raw values
//! and its risk is the canonical, override-free assessment.
//!
//! Randomness comes only from the caller-supplied generator, so a seeded
//! generator reproduces the same week.

use crate::core::{EnvironmentalReading, MetricOverrides, PatientProfile, SymptomState};
use crate::risk::{LungRiskLevel, LungRiskModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const WEEK_LENGTH: usize = 7;
const TODAY: usize = WEEK_LENGTH - 1;

/// Uniform noise bounds and the physiological range the result is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    pub noise_low: f64,
    pub noise_high: f64,
    pub min: f64,
    pub max: f64,
}

impl Perturbation {
    const fn new(noise_low: f64, noise_high: f64, min: f64, max: f64) -> Self {
        Self {
            noise_low,
            noise_high,
            min,
            max,
        }
    }

    fn apply<R: Rng + ?Sized>(&self, base: f64, multiplier: f64, rng: &mut R) -> f64 {
        let noise = rng.gen_range(self.noise_low..self.noise_high);
        (base + noise * multiplier).clamp(self.min, self.max)
    }
}

pub const AQI_PERTURBATION: Perturbation = Perturbation::new(-40.0, 30.0, 50.0, 500.0);
pub const SPO2_PERTURBATION: Perturbation = Perturbation::new(-2.0, 3.0, 85.0, 100.0);
pub const SEVERITY_PERTURBATION: Perturbation = Perturbation::new(-3.0, 2.0, 0.0, 10.0);

/// One day of the simulated week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub day: usize,
    pub aqi: f64,
    pub spo2: f64,
    pub cough_severity: f64,
    pub breathlessness_severity: f64,
    pub risk_percentage: f64,
    pub risk_level: LungRiskLevel,
}

pub type DailySeries = [DailySnapshot; WEEK_LENGTH];

/// Noise scale for a day: 1.0 six days ago, 0.0 today.
pub fn variance_multiplier(day: usize) -> f64 {
    TODAY.saturating_sub(day) as f64 / TODAY as f64
}

/// Seeded generator when a seed is given, fresh entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeeklyHistorySimulator {
    model: LungRiskModel,
}

impl WeeklyHistorySimulator {
    pub fn new(model: LungRiskModel) -> Self {
        Self { model }
    }

    pub fn simulate<R: Rng + ?Sized>(
        &self,
        profile: &PatientProfile,
        symptoms: &SymptomState,
        environment: &EnvironmentalReading,
        rng: &mut R,
    ) -> DailySeries {
        let mut series: DailySeries = std::array::from_fn(|day| {
            self.simulate_day(day, profile, symptoms, environment, &mut *rng)
        });

        series[TODAY] = self.anchor_today(profile, symptoms, environment);

        debug!(
            first_day_risk = series[0].risk_percentage,
            today_risk = series[TODAY].risk_percentage,
            "Simulated weekly history"
        );

        series
    }

    fn simulate_day<R: Rng + ?Sized>(
        &self,
        day: usize,
        profile: &PatientProfile,
        symptoms: &SymptomState,
        environment: &EnvironmentalReading,
        rng: &mut R,
    ) -> DailySnapshot {
        let multiplier = variance_multiplier(day);
        let overrides = MetricOverrides {
            aqi: Some(AQI_PERTURBATION.apply(environment.aqi, multiplier, rng)),
            spo2: Some(SPO2_PERTURBATION.apply(symptoms.spo2, multiplier, rng)),
            cough_severity: Some(SEVERITY_PERTURBATION.apply(
                symptoms.cough_severity,
                multiplier,
                rng,
            )),
            breathlessness_severity: Some(SEVERITY_PERTURBATION.apply(
                symptoms.breathlessness_severity,
                multiplier,
                rng,
            )),
        };

        let assessment = self
            .model
            .assess(environment, profile, symptoms, Some(&overrides));

        DailySnapshot {
            day,
            aqi: overrides.aqi.unwrap_or(environment.aqi),
            spo2: overrides.spo2.unwrap_or(symptoms.spo2),
            cough_severity: overrides
                .cough_severity
                .unwrap_or(symptoms.cough_severity),
            breathlessness_severity: overrides
                .breathlessness_severity
                .unwrap_or(symptoms.breathlessness_severity),
            risk_percentage: assessment.risk_percentage,
            risk_level: assessment.risk_level,
        }
    }

    fn anchor_today(
        &self,
        profile: &PatientProfile,
        symptoms: &SymptomState,
        environment: &EnvironmentalReading,
    ) -> DailySnapshot {
        let assessment = self.model.assess(environment, profile, symptoms, None);

        DailySnapshot {
            day: TODAY,
            aqi: environment.aqi,
            spo2: symptoms.spo2,
            cough_severity: symptoms.cough_severity,
            breathlessness_severity: symptoms.breathlessness_severity,
            risk_percentage: assessment.risk_percentage,
            risk_level: assessment.risk_level,
        }
    }
}
