//! Computes a deviance level from the three scores and prints it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fuzzy_deviance::{DevianceModel, EngineConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deviance")]
#[command(about = "Fuzzy inference of a deviance level (0-100)")]
struct Args {
    /// Academic performance, 0-100
    #[arg(allow_negative_numbers = true, required_unless_present = "curves")]
    academic_performance: Option<f64>,

    /// School behavior, 0-100
    #[arg(allow_negative_numbers = true, required_unless_present = "curves")]
    school_behavior: Option<f64>,

    /// Family situation, 0-100
    #[arg(allow_negative_numbers = true, required_unless_present = "curves")]
    family_situation: Option<f64>,

    /// TOML file selecting the inference operators
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the evaluation report as JSON instead of the bare value
    #[arg(long)]
    report: bool,

    /// Print every membership curve as JSON and exit
    #[arg(long)]
    curves: bool,

    /// Logging level, overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = match &args.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading engine configuration from {}", path.display());
            EngineConfig::load_from_file(path)?
        },
        None => EngineConfig::default(),
    };

    let model = DevianceModel::with_config(config)?;

    if args.curves {
        println!("{}", serde_json::to_string_pretty(&model.membership_curves()?)?);
        return Ok(());
    }

    let (Some(academic), Some(behavior), Some(family)) = (
        args.academic_performance,
        args.school_behavior,
        args.family_situation,
    ) else {
        return Err("three scores are required".into());
    };

    if args.report {
        let report = model.report(academic, behavior, family)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", model.compute_deviance(academic, behavior, family)?);
    }

    Ok(())
}
