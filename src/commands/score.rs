use anyhow::Result;
use serde_json::Value;

use super::CommandContext;
use crate::risk::{BasicRiskResult, BasicRiskScorer};

/// Score raw command-line readings. Each value is handed over as a JSON
/// string so unreadable input takes the scorer's defaults.
pub fn score_from_args(
    aqi: Option<&str>,
    heart_rate: Option<&str>,
    spo2: Option<&str>,
) -> BasicRiskResult {
    let as_value = |raw: Option<&str>| raw.map(|s| Value::String(s.to_string()));
    let (aqi, heart_rate, spo2) = (as_value(aqi), as_value(heart_rate), as_value(spo2));

    BasicRiskScorer::default().score_values(aqi.as_ref(), heart_rate.as_ref(), spo2.as_ref())
}

pub fn run_score(
    context: &CommandContext,
    aqi: Option<&str>,
    heart_rate: Option<&str>,
    spo2: Option<&str>,
) -> Result<()> {
    let result = score_from_args(aqi, heart_rate, spo2);
    tracing::debug!(risk_score = result.risk_score, "Scored basic readings");
    context.writer().write_score(&result)
}
