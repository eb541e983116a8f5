//! CLI command implementations for breathometer.
//!
//! Available commands:
//! - **score**: quick composite score from AQI, heart rate and SpO2
//! - **assess**: single-point lung infection risk
//! - **weekly**: simulated seven-day trend report with insights
//! - **init**: write a default `.breathometer.toml`
//!
//! Every command except `init` runs against a [`CommandContext`] holding the
//! resolved configuration and output settings.

pub mod assess;
pub mod init;
pub mod score;
pub mod weekly;

pub use assess::run_assess;
pub use init::init_config;
pub use score::run_score;
pub use weekly::run_weekly;

use anyhow::Result;

use crate::cli::Cli;
use crate::config::{load_config, load_config_from_path, BreathometerConfig};
use crate::formatting::FormattingConfig;
use crate::io::output::{create_writer, OutputFormat, OutputWriter};

/// Settings shared by all report-producing commands.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: BreathometerConfig,
    pub format: OutputFormat,
    pub formatting: FormattingConfig,
}

impl CommandContext {
    /// Resolve configuration, then let command-line flags override it.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => load_config_from_path(path)?,
            None => load_config(),
        };

        Ok(Self::new(config, cli.format, cli.plain))
    }

    pub fn new(config: BreathometerConfig, format: Option<OutputFormat>, plain: bool) -> Self {
        let format = format
            .or(config.output.default_format)
            .unwrap_or(OutputFormat::Terminal);
        let formatting = if plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };

        Self {
            config,
            format,
            formatting,
        }
    }

    pub fn writer(&self) -> Box<dyn OutputWriter> {
        create_writer(self.format, self.formatting)
    }
}
