use crate::io::output::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "breathometer")]
#[command(about = "Lung infection risk scoring and weekly respiratory trend reports")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .breathometer.toml)
    #[arg(long, global = true, env = "BREATHOMETER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (overrides [output].default_format)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// ASCII-only output without colors
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Quick composite score from AQI, heart rate and SpO2
    Score {
        /// Air quality index; non-numeric values fall back to 0
        #[arg(long, allow_hyphen_values = true)]
        aqi: Option<String>,

        /// Heart rate in bpm; non-numeric values fall back to 72
        #[arg(long, allow_hyphen_values = true)]
        heart_rate: Option<String>,

        /// Blood oxygen saturation in percent; non-numeric values fall back to 98
        #[arg(long, allow_hyphen_values = true)]
        spo2: Option<String>,
    },

    /// Assess current lung infection risk from a JSON request
    Assess {
        /// Request file, or - for stdin
        input: PathBuf,
    },

    /// Simulate the past week and build a trend report from a JSON request
    Weekly {
        /// Request file, or - for stdin
        input: PathBuf,

        /// Seed for a reproducible week (overrides [simulation].seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the remote model and use the built-in insight rules
        #[arg(long)]
        offline: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_score_command() {
        let cli = Cli::parse_from([
            "breathometer",
            "score",
            "--aqi",
            "285",
            "--heart-rate",
            "abc",
            "--spo2",
            "-5",
        ]);

        match cli.command {
            Commands::Score {
                aqi,
                heart_rate,
                spo2,
            } => {
                assert_eq!(aqi.as_deref(), Some("285"));
                assert_eq!(heart_rate.as_deref(), Some("abc"));
                assert_eq!(spo2.as_deref(), Some("-5"));
            }
            _ => panic!("Expected Score command"),
        }
    }

    #[test]
    fn test_cli_parsing_weekly_with_global_flags() {
        let cli = Cli::parse_from([
            "breathometer",
            "weekly",
            "request.json",
            "--seed",
            "42",
            "--offline",
            "--format",
            "json",
            "-vv",
        ]);

        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Weekly {
                input,
                seed,
                offline,
            } => {
                assert_eq!(input, PathBuf::from("request.json"));
                assert_eq!(seed, Some(42));
                assert!(offline);
            }
            _ => panic!("Expected Weekly command"),
        }
    }

    #[test]
    fn test_cli_parsing_init_command() {
        let cli = Cli::parse_from(["breathometer", "init", "--force"]);

        match cli.command {
            Commands::Init { force } => {
                assert!(force);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
