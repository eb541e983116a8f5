use anyhow::{Context, Result};
use std::path::Path;

use super::CommandContext;
use crate::core::AssessmentRequest;
use crate::io::read_input;
use crate::risk::LungRiskModel;

/// Parse a flat JSON request body.
pub fn parse_request(body: &str) -> Result<AssessmentRequest> {
    serde_json::from_str(body).context("Request is not a valid assessment JSON object")
}

pub fn run_assess(context: &CommandContext, input: &Path) -> Result<()> {
    let request = parse_request(&read_input(input)?)?;
    let report = LungRiskModel::new().assess_request(&request)?;

    tracing::debug!(
        risk = report.assessment.risk_percentage,
        level = %report.assessment.risk_level,
        "Assessed lung risk"
    );

    context.writer().write_assessment(&report)
}
