use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use oxidize_sched::config::load_config;
use oxidize_sched::{build_param_scheduler, ParamScheduler};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Print a parameter schedule sampled over a training run.
#[derive(Debug, Parser)]
#[command(name = "oxidize-sched", version)]
struct Cli {
    /// JSON scheduler configuration
    #[arg(short, long)]
    config: PathBuf,

    /// Number of updates (steps or epochs) to sample
    #[arg(short, long, default_value_t = 100)]
    updates: usize,

    /// Emit a JSON array instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct Sample {
    update: usize,
    progress: f64,
    value: f64,
}

/// Evaluate `scheduler` at `update / updates` for every update of the run.
fn preview(scheduler: &dyn ParamScheduler, updates: usize) -> Result<Vec<Sample>> {
    if updates == 0 {
        bail!("--updates must be at least 1");
    }
    (0..updates)
        .map(|update| {
            let progress = update as f64 / updates as f64;
            let value = scheduler
                .value_at(progress)
                .with_context(|| format!("evaluating update {}", update))?;
            Ok(Sample { update, progress, value })
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oxidize_sched=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let scheduler = build_param_scheduler(&config)?;
    info!(
        name = config.name(),
        update_interval = %scheduler.update_interval(),
        updates = cli.updates,
        "previewing schedule"
    );

    let samples = preview(scheduler.as_ref(), cli.updates)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
    } else {
        println!("{:>8}  {:>10}  {:>14}", scheduler.update_interval(), "progress", "value");
        for s in &samples {
            println!("{:>8}  {:>10.6}  {:>14.8}", s.update, s.progress, s.value);
        }
    }

    Ok(())
}
