//! Baggage conveyor dispatch CLI.
//!
//! Schedule a flights file once, run repeated batches into a results log,
//! or summarize an existing results log.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_baggage::config::DispatchConfig;
use u_baggage::models::Job;
use u_baggage::pipeline::{DispatchOutcome, Dispatcher};
use u_baggage::report::{self, ResultsLog, RunRecord};
use u_baggage::timing::{format_instant, format_span};

#[derive(Parser)]
#[command(name = "u-baggage", version)]
#[command(about = "Baggage-claim conveyor scheduling with list scheduling and tabu search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule a flights file once and print every job.
    Run {
        /// Flights CSV file
        flights: PathBuf,
        /// Tabu search iterations
        #[arg(short, long)]
        iterations: Option<usize>,
        /// Seed for duration jitter
        #[arg(long)]
        seed: Option<u64>,
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Append the before/after pair to this results log
        #[arg(long)]
        results_log: Option<PathBuf>,
    },

    /// Schedule a flights file repeatedly and summarize the improvements.
    Batch {
        /// Flights CSV file
        flights: PathBuf,
        /// Number of runs
        #[arg(short, long, default_value = "100")]
        runs: usize,
        /// Tabu search iterations
        #[arg(short, long)]
        iterations: Option<usize>,
        /// Base seed; run `k` uses `seed + k`
        #[arg(long)]
        seed: Option<u64>,
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Results log (truncated first)
        #[arg(long, default_value = "results_list.csv")]
        results_log: PathBuf,
        /// Statistics output file
        #[arg(long, default_value = "results_stats.txt")]
        summary: PathBuf,
    },

    /// Add improvement diffs to a results log and write statistics.
    Summarize {
        /// Results log to rewrite
        results_log: PathBuf,
        /// Statistics output file
        dest: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn load_config(
    path: Option<&Path>,
    iterations: Option<usize>,
    seed: Option<u64>,
) -> Result<DispatchConfig> {
    let mut config = match path {
        Some(path) => DispatchConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => DispatchConfig::default(),
    };
    if let Some(iterations) = iterations {
        config = config.with_iterations(iterations);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn job_line(job: &Job) -> String {
    format!(
        "({}, {}, {}, {}, {}, {}, {}, {})",
        job.code,
        format_span(job.size_ms),
        format_instant(job.release_ms),
        format_instant(job.start_ms),
        job.terminal,
        job.conveyor,
        format_span(job.flow_ms),
        format_instant(job.end_ms),
    )
}

fn print_outcome(outcome: &DispatchOutcome, format: OutputFormat) -> Result<()> {
    let (_, kpi) = outcome.kpis();
    match format {
        OutputFormat::Text => {
            for job in outcome.best.jobs() {
                println!("{}", job_line(job));
            }
            println!();
            println!("Max flow time (list schedule): {}", format_span(outcome.initial_max_flow_ms()));
            println!("Max flow time (tabu search):   {}", format_span(outcome.best_max_flow_ms()));
            println!("Average flow time:             {}", format_span(kpi.avg_flow_ms.round() as i64));
            println!("Average conveyor utilization:  {:.1}%", kpi.avg_utilization * 100.0);
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "jobs": outcome.best.jobs(),
                "summary": outcome.summary(),
                "kpi": kpi,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

fn record_of(outcome: &DispatchOutcome) -> RunRecord {
    RunRecord::new(outcome.initial_max_flow_ms(), outcome.best_max_flow_ms())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            flights,
            iterations,
            seed,
            config,
            format,
            results_log,
        } => {
            let config = load_config(config.as_deref(), iterations, seed)?;
            let outcome = Dispatcher::new(config)
                .dispatch_file(&flights)
                .with_context(|| format!("dispatching {}", flights.display()))?;
            print_outcome(&outcome, format)?;

            if let Some(path) = results_log {
                ResultsLog::open_or_create(&path)
                    .and_then(|log| log.append(record_of(&outcome)))
                    .with_context(|| format!("appending to {}", path.display()))?;
            }
        }

        Commands::Batch {
            flights,
            runs,
            iterations,
            seed,
            config,
            results_log,
            summary,
        } => {
            let base = load_config(config.as_deref(), iterations, None)?;
            let seed = seed.or(base.seed);
            let log = ResultsLog::create(&results_log)
                .with_context(|| format!("creating {}", results_log.display()))?;

            for run in 0..runs {
                let mut config = base.clone();
                config.seed = seed.map(|s| s.wrapping_add(run as u64));
                let outcome = Dispatcher::new(config)
                    .dispatch_file(&flights)
                    .with_context(|| format!("run {run}: dispatching {}", flights.display()))?;
                let record = record_of(&outcome);
                log.append(record)?;
                info!(
                    run,
                    before = %format_span(record.dispatch_ms),
                    after = %format_span(record.tabu_ms),
                    "run complete"
                );
            }

            let stats = report::summarize(&results_log, &summary)
                .with_context(|| format!("summarizing {}", results_log.display()))?;
            print!("{stats}");
        }

        Commands::Summarize { results_log, dest } => {
            let stats = report::summarize(&results_log, &dest)
                .with_context(|| format!("summarizing {}", results_log.display()))?;
            print!("{stats}");
        }
    }

    Ok(())
}
