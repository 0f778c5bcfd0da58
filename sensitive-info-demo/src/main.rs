//! Sensitive data protection demo.
//!
//! Renders the same record in three shapes (plain, hand-written masking,
//! derived masking) from a large number of concurrent tasks and logs the
//! elapsed time of each scenario.
//!
//! Usage:
//!   cargo run -p sensitive-info-demo -- --tasks 10000 --scenario annotated --quiet

use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod harness;
mod models;

use harness::{Harness, Scenario, Settings};
use models::Samples;

#[derive(Parser, Debug)]
#[command(name = "sensitive-info-demo")]
#[command(about = "Benchmark masked rendering under concurrent load")]
struct Args {
    /// Number of concurrent render tasks per scenario
    #[arg(long, env = "SENSITIVE_INFO_TASKS", default_value_t = 100_000)]
    tasks: usize,

    /// Scenarios to run (repeatable). Runs all of them when omitted
    #[arg(long, value_enum)]
    scenario: Vec<Scenario>,

    /// Render without emitting a log line per task
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let scenarios = if args.scenario.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        args.scenario
    };

    let registry = models::registry()?.install()?;
    info!(registrations = registry.len(), "registry installed");

    let harness = Harness::new(
        Samples::new(Local::now().date_naive()),
        Settings {
            tasks: args.tasks,
            quiet: args.quiet,
        },
    );

    let mut timings = vec![harness.warm_up().await?];
    for scenario in scenarios {
        timings.push(harness.run(scenario).await?);
    }

    for timing in &timings {
        info!("{timing}");
    }
    Ok(())
}
