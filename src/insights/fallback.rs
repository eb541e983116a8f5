//! Deterministic, network-free insight strategy.
//!
//! Every disease score starts from the week's environmental burden,
//! `min(avg_aqi / 300 × 100, 100)`, scaled by a per-disease weight, then adds
//! profile and symptom terms. Scores are capped at 100 and ranked.

use super::disease::{rank, Disease, DiseaseRisk};
use super::{InsightBundle, InsightRequest, InsightSource, InsightStrategy};
use crate::core::{round_to, InsightError};
use async_trait::async_trait;

/// Weekly mean AQI above this is treated as unhealthy.
pub const UNHEALTHY_AQI: f64 = 150.0;
/// Number of low-SpO2 days that signals restricted oxygen intake.
pub const SPO2_DROP_ALERT_DAYS: usize = 3;

pub const OUTDOOR_AVOIDANCE_RECOMMENDATION: &str = "Air quality has been unhealthy all week. Stay indoors as much as possible, keep windows closed, run an air purifier and wear an N95 mask whenever you must go outside.";
pub const SMOKING_CESSATION_RECOMMENDATION: &str = "Quitting smoking is the single most effective step to lower your lung disease risk. Consider a cessation program or talk to your doctor about support options.";
pub const MONITORING_RECOMMENDATION: &str = "Keep tracking your symptoms and SpO2 daily, stay active in clean air, and consult a doctor if breathlessness or cough gets worse.";

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackStrategy;

impl FallbackStrategy {
    pub fn build(&self, request: &InsightRequest<'_>) -> InsightBundle {
        InsightBundle {
            insights: insights(request),
            disease_risks: disease_risks(request),
            recommendation: recommendation(request).to_string(),
        }
    }
}

#[async_trait]
impl InsightStrategy for FallbackStrategy {
    fn source(&self) -> InsightSource {
        InsightSource::Fallback
    }

    async fn generate(&self, request: &InsightRequest<'_>) -> Result<InsightBundle, InsightError> {
        Ok(self.build(request))
    }
}

pub fn base_env_risk(avg_aqi: f64) -> f64 {
    (avg_aqi / 300.0 * 100.0).clamp(0.0, 100.0)
}

fn flag(condition: bool, points: f64) -> f64 {
    if condition {
        points
    } else {
        0.0
    }
}

pub fn disease_score(disease: Disease, request: &InsightRequest<'_>) -> f64 {
    let profile = request.profile;
    let agg = request.aggregates;
    let env = base_env_risk(agg.avg_aqi);
    let age = f64::from(profile.age);
    let cigarettes = f64::from(profile.cigarettes_per_day);
    let spo2_drops = agg.spo2_drops.len() as f64;
    let fever = request.symptoms.fever;

    let score = match disease {
        Disease::AsthmaExacerbation => {
            env * 0.4
                + flag(profile.asthma, 30.0)
                + agg.avg_breathlessness * 3.0
                + flag(agg.highest_symptom.is_respiratory(), 10.0)
        }
        Disease::Copd => {
            env * 0.3
                + flag(profile.copd, 35.0)
                + flag(profile.smoking, 20.0)
                + age / 100.0 * 15.0
                + spo2_drops * 3.0
        }
        Disease::AcuteBronchitis => {
            env * 0.3 + agg.avg_cough * 4.0 + flag(fever, 15.0) + flag(profile.smoking, 10.0)
        }
        Disease::ChronicBronchitis => {
            env * 0.25
                + flag(profile.smoking, 30.0)
                + cigarettes * 0.5
                + agg.avg_cough * 2.0
                + flag(profile.copd, 10.0)
        }
        Disease::Emphysema => {
            env * 0.15
                + flag(profile.smoking, 25.0)
                + flag(profile.copd, 25.0)
                + age / 100.0 * 20.0
                + spo2_drops * 4.0
        }
        Disease::RespiratoryTractInfections => {
            env * 0.35
                + flag(profile.previous_infection, 20.0)
                + flag(fever, 15.0)
                + agg.avg_cough * 2.0
                + flag(profile.asthma, 5.0)
        }
        Disease::Pneumonia => {
            env * 0.2
                + flag(fever, 20.0)
                + spo2_drops * 8.0
                + flag(profile.age > 65, 15.0)
                + flag(profile.previous_infection, 10.0)
        }
        Disease::LungCancer => {
            env * 0.1 + flag(profile.smoking, 30.0) + cigarettes * 0.5 + age / 100.0 * 20.0
        }
    };

    round_to(score.clamp(0.0, 100.0), 1)
}

pub fn disease_risks(request: &InsightRequest<'_>) -> Vec<DiseaseRisk> {
    rank(
        Disease::ALL
            .into_iter()
            .map(|disease| DiseaseRisk::new(disease, disease_score(disease, request)))
            .collect(),
    )
}

fn insights(request: &InsightRequest<'_>) -> Vec<String> {
    let agg = request.aggregates;

    let air = if agg.avg_aqi > UNHEALTHY_AQI {
        format!(
            "Average AQI this week was {:.0}, well into the unhealthy range, which puts sustained strain on your airways.",
            agg.avg_aqi
        )
    } else {
        format!(
            "Average AQI this week was {:.0}, a range your lungs can generally tolerate.",
            agg.avg_aqi
        )
    };

    let drops = agg.spo2_drops.len();
    let oxygen = if drops >= SPO2_DROP_ALERT_DAYS {
        format!(
            "Your SpO2 fell below 95% on {drops} days this week, a sign of restricted oxygen intake worth discussing with a doctor."
        )
    } else {
        "Your blood oxygen levels stayed stable through the week.".to_string()
    };

    vec![air, oxygen]
}

fn recommendation(request: &InsightRequest<'_>) -> &'static str {
    if request.aggregates.avg_aqi > UNHEALTHY_AQI {
        OUTDOOR_AVOIDANCE_RECOMMENDATION
    } else if request.profile.smoking {
        SMOKING_CESSATION_RECOMMENDATION
    } else {
        MONITORING_RECOMMENDATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PatientProfile, SymptomState};
    use crate::testkit::aggregates_fixture;
    use crate::weekly::trend::HighestSymptom;

    fn request<'a>(
        profile: &'a PatientProfile,
        symptoms: &'a SymptomState,
        aggregates: &'a crate::weekly::trend::TrendAggregates,
    ) -> InsightRequest<'a> {
        InsightRequest {
            profile,
            symptoms,
            aggregates,
        }
    }

    #[test]
    fn test_unhealthy_air_outranks_smoking_recommendation() {
        let profile = PatientProfile {
            smoking: true,
            ..PatientProfile::default()
        };
        let symptoms = SymptomState::default();
        let aggregates = aggregates_fixture(200.0, &[]);

        let bundle = FallbackStrategy.build(&request(&profile, &symptoms, &aggregates));

        assert_eq!(bundle.recommendation, OUTDOOR_AVOIDANCE_RECOMMENDATION);
    }

    #[test]
    fn test_smoker_in_clean_air_gets_cessation_message() {
        let profile = PatientProfile {
            smoking: true,
            ..PatientProfile::default()
        };
        let symptoms = SymptomState::default();
        let aggregates = aggregates_fixture(90.0, &[]);

        let bundle = FallbackStrategy.build(&request(&profile, &symptoms, &aggregates));

        assert_eq!(bundle.recommendation, SMOKING_CESSATION_RECOMMENDATION);
    }

    #[test]
    fn test_non_smoker_in_clean_air_gets_monitoring_message() {
        let profile = PatientProfile::default();
        let symptoms = SymptomState::default();
        let aggregates = aggregates_fixture(90.0, &[]);

        let bundle = FallbackStrategy.build(&request(&profile, &symptoms, &aggregates));

        assert_eq!(bundle.recommendation, MONITORING_RECOMMENDATION);
    }

    #[test]
    fn test_exactly_two_insights_with_conditions() {
        let profile = PatientProfile::default();
        let symptoms = SymptomState::default();

        let calm = aggregates_fixture(80.0, &[94.0, 93.0]);
        let bundle = FallbackStrategy.build(&request(&profile, &symptoms, &calm));
        assert_eq!(bundle.insights.len(), 2);
        assert!(bundle.insights[0].contains("can generally tolerate"));
        assert!(bundle.insights[1].contains("stayed stable"));

        let harsh = aggregates_fixture(220.0, &[94.0, 93.0, 92.0]);
        let bundle = FallbackStrategy.build(&request(&profile, &symptoms, &harsh));
        assert_eq!(bundle.insights.len(), 2);
        assert!(bundle.insights[0].contains("unhealthy range"));
        assert!(bundle.insights[1].contains("on 3 days"));
    }

    #[test]
    fn test_asthma_exacerbation_formula() {
        let profile = PatientProfile {
            asthma: true,
            ..PatientProfile::default()
        };
        let symptoms = SymptomState::default();
        let mut aggregates = aggregates_fixture(150.0, &[]);
        aggregates.avg_breathlessness = 4.0;
        aggregates.highest_symptom = HighestSymptom::Breathlessness;

        // 50 * 0.4 + 30 + 4 * 3 + 10
        let score = disease_score(
            Disease::AsthmaExacerbation,
            &request(&profile, &symptoms, &aggregates),
        );
        assert_eq!(score, 72.0);
    }

    #[test]
    fn test_lung_cancer_formula() {
        let profile = PatientProfile {
            age: 50,
            smoking: true,
            cigarettes_per_day: 20,
            ..PatientProfile::default()
        };
        let symptoms = SymptomState::default();
        let aggregates = aggregates_fixture(300.0, &[]);

        // 100 * 0.1 + 30 + 20 * 0.5 + 0.5 * 20
        let score = disease_score(Disease::LungCancer, &request(&profile, &symptoms, &aggregates));
        assert_eq!(score, 60.0);
    }

    #[test]
    fn test_scores_are_capped_and_ranked() {
        let profile = PatientProfile {
            age: 90,
            smoking: true,
            cigarettes_per_day: 60,
            asthma: true,
            copd: true,
            previous_infection: true,
            ..PatientProfile::default()
        };
        let symptoms = SymptomState {
            fever: true,
            ..SymptomState::default()
        };
        let aggregates = aggregates_fixture(500.0, &[90.0, 91.0, 89.0, 92.0, 88.0]);

        let risks = disease_risks(&request(&profile, &symptoms, &aggregates));

        assert_eq!(risks.len(), 8);
        assert!(risks.iter().all(|r| (0.0..=100.0).contains(&r.risk_percentage)));
        assert!(risks
            .windows(2)
            .all(|w| w[0].risk_percentage >= w[1].risk_percentage));
    }

    #[test]
    fn test_base_env_risk_saturates() {
        assert_eq!(base_env_risk(150.0), 50.0);
        assert_eq!(base_env_risk(450.0), 100.0);
    }

    #[test]
    fn test_base_env_risk_floors_negative_aqi() {
        assert_eq!(base_env_risk(-90.0), 0.0);
    }

    #[test]
    fn test_negative_week_average_keeps_scores_in_range() {
        let profile = PatientProfile::default();
        let symptoms = SymptomState::default();
        let aggregates = aggregates_fixture(-450.0, &[]);

        let risks = disease_risks(&request(&profile, &symptoms, &aggregates));

        assert_eq!(risks.len(), 8);
        assert!(risks
            .iter()
            .all(|r| (0.0..=100.0).contains(&r.risk_percentage)));
    }
}
