// Export modules for library usage
pub mod aqi;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod insights;
pub mod io;
pub mod observability;
pub mod risk;
pub mod testkit;
pub mod weekly;

// Re-export commonly used types
pub use crate::core::{
    AssessmentRequest, CoughType, EnvironmentalReading, Error, InsightError, MetricOverrides,
    OutdoorExposure, PatientProfile, Result, SymptomState,
};

pub use crate::aqi::{pm25_to_us_aqi, AqiCategory};

pub use crate::risk::{
    AssessmentReport, BasicRiskLevel, BasicRiskResult, BasicRiskScorer, LungRiskLevel,
    LungRiskModel, RiskAssessment, RiskBreakdown,
};

pub use crate::weekly::{
    rng_from_seed, DailySnapshot, TrendAggregates, TrendAnalyzer, WeeklyHistorySimulator,
    WeeklyReport, WeeklyReportBuilder,
};

pub use crate::insights::{
    Disease, DiseaseRisk, FallbackStrategy, InsightGenerator, InsightSource, InsightStrategy,
    RemoteStrategy, TextGenerator,
};

pub use crate::config::BreathometerConfig;

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
