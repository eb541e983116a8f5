//! Weekly report assembly: simulate the week, aggregate it, attach insights.

use super::simulator::{DailySnapshot, WeeklyHistorySimulator};
use super::trend::{AverageRiskLevel, HighestSymptom, Trend, TrendAnalyzer};
use crate::aqi::AqiCategory;
use crate::core::{round_to, AssessmentRequest, Result};
use crate::insights::{DiseaseRisk, InsightGenerator, InsightRequest, InsightSource};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub avg_cough_severity: f64,
    pub avg_breathlessness: f64,
    pub highest_symptom: HighestSymptom,
    pub avg_spo2: f64,
    pub avg_aqi: f64,
    pub avg_risk_percentage: f64,
    pub avg_risk_level: AverageRiskLevel,
    pub trend: Trend,
    pub insights: Vec<String>,
    pub disease_risks: Vec<DiseaseRisk>,
    pub recommendation: String,
    pub daily_risks: Vec<f64>,
    pub daily_snapshots: Vec<DailySnapshot>,
    /// Category of the week's mean AQI.
    pub aqi_category: AqiCategory,
    pub insight_source: InsightSource,
    pub generated_at: DateTime<Utc>,
}

/// Builds weekly reports from a simulator, an analyzer and an insight generator.
pub struct WeeklyReportBuilder {
    simulator: WeeklyHistorySimulator,
    analyzer: TrendAnalyzer,
    insights: InsightGenerator,
}

impl WeeklyReportBuilder {
    pub fn new(insights: InsightGenerator) -> Self {
        Self {
            simulator: WeeklyHistorySimulator::default(),
            analyzer: TrendAnalyzer::new(),
            insights,
        }
    }

    /// Validates the request, then runs the pipeline. Only input validation
    /// can fail: insight failures are absorbed by the fallback strategy.
    pub async fn build<R: Rng + ?Sized>(
        &self,
        request: &AssessmentRequest,
        rng: &mut R,
    ) -> Result<WeeklyReport> {
        request.validate()?;

        let environment = request.environment();
        let series = self
            .simulator
            .simulate(&request.profile, &request.symptoms, &environment, rng);
        let aggregates = self.analyzer.analyze(&series);

        let span = info_span!("insights", remote = self.insights.has_remote());
        let generated = self
            .insights
            .generate(&InsightRequest {
                profile: &request.profile,
                symptoms: &request.symptoms,
                aggregates: &aggregates,
            })
            .instrument(span)
            .await;

        info!(
            avg_risk = aggregates.avg_risk,
            trend = %aggregates.trend,
            source = %generated.source,
            "Weekly report generated"
        );

        Ok(WeeklyReport {
            avg_cough_severity: round_to(aggregates.avg_cough, 1),
            avg_breathlessness: round_to(aggregates.avg_breathlessness, 1),
            highest_symptom: aggregates.highest_symptom,
            avg_spo2: round_to(aggregates.avg_spo2, 1),
            avg_aqi: round_to(aggregates.avg_aqi, 1),
            avg_risk_percentage: round_to(aggregates.avg_risk, 1),
            avg_risk_level: aggregates.avg_risk_level,
            trend: aggregates.trend,
            insights: generated.bundle.insights,
            disease_risks: generated.bundle.disease_risks,
            recommendation: generated.bundle.recommendation,
            daily_risks: aggregates.daily_risks,
            daily_snapshots: series.to_vec(),
            aqi_category: AqiCategory::classify(aggregates.avg_aqi),
            insight_source: generated.source,
            generated_at: Utc::now(),
        })
    }
}
