pub mod basic;
pub mod lung;

pub use basic::{BasicRiskLevel, BasicRiskResult, BasicRiskScorer};
pub use lung::{AssessmentReport, LungRiskLevel, LungRiskModel, RiskAssessment, RiskBreakdown};
