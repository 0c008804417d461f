use std::path::PathBuf;

use clap::Parser;

use marjapussi_bench::config::{BenchmarkConfig, ResolvedOutputs};
use marjapussi_bench::logging::init_logging;
use marjapussi_bench::runner::MatchRunner;

/// Head-to-head harness for Marjapussi policies.
#[derive(Debug, Parser)]
#[command(
    name = "marjapussi-bench",
    author,
    version,
    about = "Deterministic Marjapussi policy comparison harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.deals.games = games;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    println!(
        "Loaded configuration '{run_id}': {} ({}) vs {} ({}), {} games at game value {}",
        config.policies.a.name,
        config.policies.a.kind,
        config.policies.b.name,
        config.policies.b.kind,
        config.deals.games,
        config.deals.game_value,
    );

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = MatchRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} games → {} rows at {}",
        summary.games_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    for side in &summary.analytics.sides {
        match side.win_rate {
            Some(rate) => println!(
                "  {} declared {}/{} games and won {}/{} = {:.2}%",
                side.name,
                side.declared,
                side.games,
                side.declared_won,
                side.declared,
                rate * 100.0
            ),
            None => println!("  {}: insufficient data (never declared)", side.name),
        }
    }
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
