//! Remote insight strategy backed by a [`TextGenerator`].
//!
//! The collaborator's answer is accepted only when it is a complete, strict
//! JSON object: at most two insights, every taxonomy disease exactly once with
//! a percentage in `0..=100`, and a non-empty recommendation. Anything else is
//! a [`InsightError::MalformedResponse`].

use super::client::TextGenerator;
use super::disease::{rank, Disease, DiseaseRisk};
use super::{InsightBundle, InsightRequest, InsightSource, InsightStrategy, MAX_INSIGHTS};
use crate::core::InsightError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct RemoteStrategy {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl RemoteStrategy {
    pub fn new<G: TextGenerator + 'static>(generator: G, timeout: Duration) -> Self {
        Self::from_shared(Arc::new(generator), timeout)
    }

    pub fn from_shared(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }
}

#[async_trait]
impl InsightStrategy for RemoteStrategy {
    fn source(&self) -> InsightSource {
        InsightSource::Remote
    }

    async fn generate(&self, request: &InsightRequest<'_>) -> Result<InsightBundle, InsightError> {
        let prompt = build_prompt(request);
        debug!(
            prompt_len = prompt.len(),
            timeout_secs = self.timeout.as_secs(),
            "Calling text generator"
        );

        let text = tokio::time::timeout(self.timeout, self.generator.complete(&prompt))
            .await
            .map_err(|_| InsightError::Timeout {
                after: self.timeout,
            })??;

        parse_response(&text)
    }
}

pub fn build_prompt(request: &InsightRequest<'_>) -> String {
    let profile = request.profile;
    let symptoms = request.symptoms;
    let agg = request.aggregates;

    let mut prompt = String::from(
        "Analyze this patient's lung health over the past 7 days and estimate their risk for each respiratory condition.\n\n",
    );

    let _ = writeln!(prompt, "Patient profile:");
    let _ = writeln!(prompt, "- Age: {}", profile.age);
    let _ = writeln!(
        prompt,
        "- Smoker: {} ({} cigarettes/day)",
        yes_no(profile.smoking),
        profile.cigarettes_per_day
    );
    let _ = writeln!(prompt, "- Asthma: {}", yes_no(profile.asthma));
    let _ = writeln!(prompt, "- COPD: {}", yes_no(profile.copd));
    let _ = writeln!(
        prompt,
        "- Previous lung infection: {}",
        yes_no(profile.previous_infection)
    );
    let _ = writeln!(prompt, "- Outdoor exposure: {:?}", profile.outdoor_exposure);
    let _ = writeln!(prompt, "- Fever today: {}", yes_no(symptoms.fever));
    let _ = writeln!(prompt, "- Chest pain today: {}", yes_no(symptoms.chest_pain));

    let _ = writeln!(prompt, "\nWeekly averages:");
    let _ = writeln!(prompt, "- AQI: {:.1}", agg.avg_aqi);
    let _ = writeln!(prompt, "- SpO2: {:.1}%", agg.avg_spo2);
    let _ = writeln!(prompt, "- Cough severity: {:.1}/10", agg.avg_cough);
    let _ = writeln!(prompt, "- Breathlessness: {:.1}/10", agg.avg_breathlessness);
    let _ = writeln!(prompt, "- Lung risk: {:.1}% ({})", agg.avg_risk, agg.avg_risk_level);
    let _ = writeln!(prompt, "- Dominant symptom: {}", agg.highest_symptom);
    let _ = writeln!(prompt, "- Risk trend: {}", agg.trend);
    let _ = writeln!(
        prompt,
        "- Days with SpO2 below 95%: {} {:?}",
        agg.spo2_drops.len(),
        agg.spo2_drops
    );

    let names: Vec<&str> = Disease::ALL.iter().map(|d| d.name()).collect();
    let _ = writeln!(
        prompt,
        "\nReturn ONLY a JSON object with exactly these keys:\n\
         - \"insights\": an array of at most {MAX_INSIGHTS} short sentences about this week\n\
         - \"disease_risks\": an array of objects {{\"name\": string, \"risk_percentage\": number 0-100}}, one for each of: {}\n\
         - \"recommendation\": one actionable sentence",
        names.join(", ")
    );

    prompt
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[derive(Debug, Deserialize)]
struct RawBundle {
    insights: Vec<String>,
    disease_risks: Vec<RawDiseaseRisk>,
    recommendation: String,
}

#[derive(Debug, Deserialize)]
struct RawDiseaseRisk {
    name: String,
    risk_percentage: f64,
}

/// Models often wrap JSON in a markdown fence; accept that, nothing looser.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

pub fn parse_response(text: &str) -> Result<InsightBundle, InsightError> {
    let raw: RawBundle = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| InsightError::malformed(format!("invalid JSON: {e}")))?;

    if raw.insights.len() > MAX_INSIGHTS {
        return Err(InsightError::malformed(format!(
            "expected at most {MAX_INSIGHTS} insights, got {}",
            raw.insights.len()
        )));
    }
    if raw.insights.iter().any(|s| s.trim().is_empty()) {
        return Err(InsightError::malformed("insights contain an empty entry"));
    }
    if raw.recommendation.trim().is_empty() {
        return Err(InsightError::malformed("recommendation is empty"));
    }

    let disease_risks = validate_disease_risks(raw.disease_risks)?;

    Ok(InsightBundle {
        insights: raw.insights.into_iter().map(|s| s.trim().to_string()).collect(),
        disease_risks: rank(disease_risks),
        recommendation: raw.recommendation.trim().to_string(),
    })
}

fn validate_disease_risks(raw: Vec<RawDiseaseRisk>) -> Result<Vec<DiseaseRisk>, InsightError> {
    if raw.len() != Disease::ALL.len() {
        return Err(InsightError::malformed(format!(
            "expected {} disease risks, got {}",
            Disease::ALL.len(),
            raw.len()
        )));
    }

    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|entry| {
            let disease: Disease = entry.name.parse().map_err(InsightError::malformed)?;
            if !seen.insert(disease) {
                return Err(InsightError::malformed(format!("duplicate disease `{disease}`")));
            }
            if !entry.risk_percentage.is_finite()
                || !(0.0..=100.0).contains(&entry.risk_percentage)
            {
                return Err(InsightError::malformed(format!(
                    "risk for {disease} out of range: {}",
                    entry.risk_percentage
                )));
            }
            Ok(DiseaseRisk::new(disease, entry.risk_percentage))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PatientProfile, SymptomState};
    use crate::testkit::{aggregates_fixture, valid_remote_payload, StubTextGenerator};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_valid_payload_ranks_descending() {
        let bundle = parse_response(&valid_remote_payload()).unwrap();

        assert_eq!(bundle.disease_risks.len(), 8);
        assert!(bundle
            .disease_risks
            .windows(2)
            .all(|w| w[0].risk_percentage >= w[1].risk_percentage));
        assert_eq!(bundle.insights.len(), 2);
    }

    #[test]
    fn test_parse_accepts_fenced_json() {
        let fenced = format!("```json\n{}\n```", valid_remote_payload());
        assert!(parse_response(&fenced).is_ok());
    }

    #[test]
    fn test_parse_rejects_missing_keys() {
        let err = parse_response(r#"{"insights": [], "recommendation": "Rest."}"#).unwrap_err();
        assert_eq!(err.kind(), "malformed_response");
    }

    #[test]
    fn test_parse_rejects_unknown_disease() {
        let payload = valid_remote_payload().replace("Pneumonia", "Tuberculosis");
        assert!(parse_response(&payload).is_err());
    }

    #[test]
    fn test_parse_rejects_duplicate_disease() {
        let payload = valid_remote_payload().replace("Pneumonia", "COPD");
        let err = parse_response(&payload).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_parse_rejects_out_of_range_percentage() {
        let payload = valid_remote_payload().replace("61.5", "161.5");
        assert!(parse_response(&payload).is_err());
    }

    #[test]
    fn test_parse_rejects_too_many_insights() {
        let payload = valid_remote_payload().replace(
            r#""insights": ["#,
            r#""insights": ["One more.", "#,
        );
        assert!(parse_response(&payload).is_err());
    }

    #[test]
    fn test_prompt_names_every_disease() {
        let profile = PatientProfile::default();
        let symptoms = SymptomState::default();
        let aggregates = aggregates_fixture(110.0, &[94.0]);
        let prompt = build_prompt(&InsightRequest {
            profile: &profile,
            symptoms: &symptoms,
            aggregates: &aggregates,
        });

        for disease in Disease::ALL {
            assert!(prompt.contains(disease.name()), "missing {disease}");
        }
        assert!(prompt.contains("AQI: 110.0"));
    }

    #[tokio::test]
    async fn test_slow_generator_times_out() {
        let profile = PatientProfile::default();
        let symptoms = SymptomState::default();
        let aggregates = aggregates_fixture(110.0, &[]);
        let strategy = RemoteStrategy::new(
            StubTextGenerator::slow(Duration::from_secs(5), valid_remote_payload()),
            Duration::from_millis(20),
        );

        let err = strategy
            .generate(&InsightRequest {
                profile: &profile,
                symptoms: &symptoms,
                aggregates: &aggregates,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "collaborator_timeout");
    }
}
