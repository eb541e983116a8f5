use anyhow::Result;
use std::path::Path;
use tracing::warn;

use super::assess::parse_request;
use super::CommandContext;
use crate::config::InsightsConfig;
use crate::insights::{ChatCompletionsClient, InsightGenerator, RemoteStrategy};
use crate::io::read_input;
use crate::weekly::{rng_from_seed, WeeklyReportBuilder};

/// Remote-then-fallback generator, or fallback only when remote insights are
/// disabled or cannot be set up.
pub fn build_insight_generator(config: &InsightsConfig, offline: bool) -> InsightGenerator {
    if offline || !config.remote_enabled {
        return InsightGenerator::offline();
    }

    match ChatCompletionsClient::from_config(config) {
        Ok(client) => InsightGenerator::with_remote(Box::new(RemoteStrategy::new(
            client,
            config.timeout(),
        ))),
        Err(err) => {
            warn!(kind = err.kind(), error = %err, "Remote insights disabled, using fallback");
            InsightGenerator::offline()
        }
    }
}

pub async fn run_weekly(
    context: &CommandContext,
    input: &Path,
    seed: Option<u64>,
    offline: bool,
) -> Result<()> {
    let request = parse_request(&read_input(input)?)?;
    let seed = seed.or(context.config.simulation.seed);

    let builder = WeeklyReportBuilder::new(build_insight_generator(
        &context.config.insights,
        offline,
    ));
    let report = builder.build(&request, &mut rng_from_seed(seed)).await?;

    context.writer().write_weekly(&report)
}
