use anyhow::Result;
use breathometer::cli::{Cli, Commands};
use breathometer::commands::{self, CommandContext};
use breathometer::observability::init_tracing;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Init { force } = cli.command {
        return commands::init_config(force);
    }

    let context = CommandContext::from_cli(&cli)?;

    match cli.command {
        Commands::Score {
            aqi,
            heart_rate,
            spo2,
        } => commands::run_score(&context, aqi.as_deref(), heart_rate.as_deref(), spo2.as_deref()),
        Commands::Assess { input } => commands::run_assess(&context, &input),
        Commands::Weekly {
            input,
            seed,
            offline,
        } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(commands::run_weekly(&context, &input, seed, offline))
        }
        Commands::Init { .. } => Ok(()),
    }
}
