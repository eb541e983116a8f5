use serde::{Deserialize, Serialize};

use super::insights::InsightsConfig;
use crate::io::output::OutputFormat;

/// Root configuration structure for breathometer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BreathometerConfig {
    /// Remote insight generation
    #[serde(default)]
    pub insights: InsightsConfig,

    /// Weekly history simulation
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl BreathometerConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.insights.validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed seed for reproducible weeks; fresh entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}
