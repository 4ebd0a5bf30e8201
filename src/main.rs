//! CLI entry point for the heat-stress pipeline.
//!
//! Provides subcommands for aggregating sub-daily observations to daily
//! statistics, characterizing daily statistics into risk categories, and
//! running both stages back-to-back.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use heat_stress::config::{LogConfig, OutputLayout};
use heat_stress::output::{print_json, print_pretty};
use heat_stress::pipeline::{run_aggregate, run_characterize};
use heat_stress::plot::LoggingRenderer;
use heat_stress::timestamp::DateOrder;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "heat_stress")]
#[command(about = "Daily heat-stress aggregation and exposure characterization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate sub-daily observations to daily min/mean/max
    Aggregate {
        /// Input CSV file (sub-daily observations)
        #[arg(long)]
        input: PathBuf,

        /// Directory to write daily_WBGT_THI_stats.csv
        #[arg(long)]
        outdir: PathBuf,

        /// Parse ambiguous dates day-first (e.g. D/M/Y)
        #[arg(long, default_value_t = false)]
        dayfirst: bool,
    },
    /// Categorize daily statistics and summarize exposure
    Characterize {
        /// Input daily CSV (from the aggregate stage)
        #[arg(long)]
        input: PathBuf,

        /// Directory to write the categorized table, summary and plots/
        #[arg(long)]
        outdir: PathBuf,
    },
    /// Run both stages, characterizing the daily file just written
    Run {
        /// Input CSV file (sub-daily observations)
        #[arg(long)]
        input: PathBuf,

        /// Directory to write every output
        #[arg(long)]
        outdir: PathBuf,

        /// Parse ambiguous dates day-first (e.g. D/M/Y)
        #[arg(long, default_value_t = false)]
        dayfirst: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_config = LogConfig::from_env();
    let file_appender = tracing_appender::rolling::daily(&log_config.dir, &log_config.file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or_else(|_| EnvFilter::new("debug")),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Aggregate {
            input,
            outdir,
            dayfirst,
        } => {
            aggregate(&input, &outdir, dayfirst)?;
        }
        Commands::Characterize { input, outdir } => {
            characterize(&input, &outdir)?;
        }
        Commands::Run {
            input,
            outdir,
            dayfirst,
        } => {
            let daily = aggregate(&input, &outdir, dayfirst)?;
            characterize(&daily, &outdir)?;
        }
    }

    info!("All outputs written");
    Ok(())
}

/// Runs stage 1 and returns the path of the daily file it wrote.
fn aggregate(input: &Path, outdir: &Path, dayfirst: bool) -> Result<PathBuf> {
    let layout = OutputLayout::new(outdir);
    let outcome = run_aggregate(input, &layout, DateOrder::from_dayfirst(dayfirst))
        .with_context(|| format!("daily aggregation of {} failed", input.display()))?;

    info!(
        timestamp_column = %outcome.timestamp_column.name,
        dropped_rows = outcome.diagnostics.dropped_rows(),
        "Aggregation complete"
    );
    Ok(layout.daily())
}

fn characterize(input: &Path, outdir: &Path) -> Result<()> {
    let layout = OutputLayout::new(outdir);
    let result = run_characterize(input, &layout, &mut LoggingRenderer)
        .with_context(|| format!("characterization of {} failed", input.display()))?;

    print_pretty(&result.summary);
    print_json(&result.summary)?;
    Ok(())
}
