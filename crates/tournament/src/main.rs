//! Tournament CLI
//!
//! Play duplicate matches with an external simulator and save their reports.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tournament::{
    batch_id, save_play_counts, JsonReportWriter, MatchScheduler, ReportWriter, TournamentConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tournament")]
#[command(about = "Duplicate-format tournament runner", long_about = None)]
struct Args {
    /// Path to the tournament config (TOML)
    #[arg(short, long, default_value = "tournament.toml")]
    config: PathBuf,

    /// Override the run name used as batch id prefix
    #[arg(long)]
    run_name: Option<String>,

    /// Override the number of matches to play
    #[arg(short, long)]
    matches: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = TournamentConfig::load(&args.config)?;
    let run_name = args.run_name.unwrap_or_else(|| config.run_name.clone());
    let matches = args.matches.unwrap_or(config.matches);

    let pool = config.pool()?;
    let selector = config.selector(&pool)?;
    let scheduler = MatchScheduler::new(
        config.scheduler_config(),
        pool,
        config.engine(),
        selector,
        config.seed_generator()?,
    );
    let writer = JsonReportWriter::new(&config.matching_dir);

    println!("=== Run: {} ===", run_name);
    println!(
        "Matches: {}, trials per seating: {}",
        matches, config.trials_per_seating
    );
    println!();

    for index in 0..matches {
        let batch = batch_id(&run_name, index, matches);
        let started = Instant::now();

        let report = scheduler
            .run_match(&batch)
            .await
            .with_context(|| format!("Match {} failed", batch))?;
        let path = writer
            .write(&report)
            .with_context(|| format!("Failed to save report for {}", batch))?;

        info!(batch = %batch, elapsed = ?started.elapsed(), path = %path.display(), "report saved");

        if let Some(counts_path) = &config.counts_file {
            save_play_counts(counts_path, &scheduler.play_counts().await)
                .with_context(|| format!("Failed to save play counts {}", counts_path.display()))?;
        }
        println!("{}", report.generate_report());
    }

    println!("=== Play counts ===");
    for (id, count) in scheduler.play_counts().await.iter() {
        println!("{:<12} {:>6}", id.to_string(), count);
    }

    Ok(())
}
