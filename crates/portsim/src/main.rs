use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::bail;

use portsim::table::{render_headline, render_table};
use portsim::{ProjectionRequest, ProjectionResponse, ProjectionWorker, init_logging};
use portsim_core::model::{DepositFrequency, ModelKind, STEPS_PER_YEAR, SimulationParameters};
use portsim_core::simulation::{ExecutionStrategy, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "portsim")]
#[command(about = "Monte Carlo portfolio projector")]
struct Args {
    /// Price model: gbm, heston, jump-diffusion, monte-carlo, fama-french
    #[arg(short, long, default_value = "gbm")]
    model: String,

    /// Starting portfolio value
    #[arg(long, default_value_t = 10_000.0)]
    initial: f64,

    /// Annualized drift
    #[arg(long, default_value_t = 0.07)]
    drift: f64,

    /// Risk-free rate; combined with --premium it replaces --drift
    #[arg(long)]
    risk_free_rate: Option<f64>,

    /// Equity premium over the risk-free rate
    #[arg(long)]
    premium: Option<f64>,

    /// Annualized volatility
    #[arg(long, default_value_t = 0.2)]
    volatility: f64,

    /// Projection horizon in years
    #[arg(short, long, default_value_t = 10)]
    years: usize,

    /// Number of simulated paths
    #[arg(short, long, default_value_t = 1000)]
    paths: usize,

    /// Periodic deposit amount
    #[arg(long, default_value_t = 0.0)]
    deposit: f64,

    /// Deposit frequency: daily, monthly, annual
    #[arg(long, default_value = "monthly")]
    deposit_frequency: String,

    /// Base seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Spawn one task per path instead of batching across CPUs
    #[arg(long)]
    per_path: bool,

    /// Emit the full projection as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Data directory for logs (default: ~/.portsim/)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".portsim")
}

fn parse_deposit_frequency(s: &str) -> color_eyre::Result<DepositFrequency> {
    match s.to_lowercase().as_str() {
        "daily" => Ok(DepositFrequency::Daily),
        "monthly" => Ok(DepositFrequency::Monthly),
        "annual" | "yearly" => Ok(DepositFrequency::Annual),
        other => bail!("unknown deposit frequency {other:?} (expected daily, monthly, or annual)"),
    }
}

fn build_params(args: &Args) -> color_eyre::Result<SimulationParameters> {
    let model: ModelKind = args.model.parse()?;

    // The drift can be given directly or composed from its components
    let drift = if args.risk_free_rate.is_some() || args.premium.is_some() {
        args.risk_free_rate.unwrap_or(0.0) + args.premium.unwrap_or(0.0)
    } else {
        args.drift
    };

    Ok(SimulationParameters {
        initial_value: args.initial,
        drift,
        volatility: args.volatility,
        step_count: args.years * STEPS_PER_YEAR,
        step_size: 1.0 / STEPS_PER_YEAR as f64,
        deposit_amount: args.deposit,
        deposit_frequency: parse_deposit_frequency(&args.deposit_frequency)?,
        model,
    })
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
    init_logging(&data_dir, &args.log_level)?;

    let params = build_params(&args)?;
    params.validate()?;
    if args.years == 0 {
        bail!("--years must be positive");
    }

    let run = RunConfig {
        path_count: args.paths,
        strategy: if args.per_path {
            ExecutionStrategy::PerPath
        } else {
            ExecutionStrategy::batched_for_cpus()
        },
        seed: args.seed,
    };

    let worker = ProjectionWorker::new();
    worker.send(ProjectionRequest::Run {
        params,
        run,
        year_count: args.years,
    });

    let outcome = loop {
        match worker.recv_timeout(Duration::from_millis(100)) {
            Some(ProjectionResponse::RunComplete(outcome)) => break *outcome,
            Some(ProjectionResponse::Cancelled) => bail!("projection cancelled"),
            Some(ProjectionResponse::Error(msg)) => bail!("projection failed: {msg}"),
            None => {
                let (completed, total) = worker.get_progress();
                eprint!("\rsimulating {completed}/{total} paths");
            }
        }
    };
    eprint!("\r");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render_table(&outcome.rows));
        println!("{}", render_headline(&outcome.headline));
        println!("(seed {}; rerun with --seed to reproduce)", outcome.stats.base_seed);
    }

    Ok(())
}
