//! Terminal host for the sorting animation engine.
//!
//! `sortviz run` plays a run with one printed line per frame; `sortviz trace`
//! records a run without pacing and prints its steps as JSON; `sortviz init`
//! writes the default config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sortviz::controller::RunController;
use sortviz::core::algorithm::Algorithm;
use sortviz::core::error::SortError;
use sortviz::core::sequence::Sequence;
use sortviz::core::types::{MAX_VALUE, Value};
use sortviz::exit_codes;
use sortviz::io::config::{init_config, load_config};
use sortviz::io::renderer::TerminalRenderer;
use sortviz::logging;
use sortviz::playback::record;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "sortviz",
    version,
    about = "Animate comparison sorts step by step"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play an algorithm over freshly generated values.
    Run {
        /// Algorithm identifier (see `sortviz list`).
        algorithm: String,
        /// Config file; defaults apply when it does not exist.
        #[arg(long, default_value = "sortviz.toml")]
        config: PathBuf,
        /// Seed for value generation (overrides config).
        #[arg(long)]
        seed: Option<u64>,
        /// Number of values (overrides config).
        #[arg(long)]
        count: Option<usize>,
        /// Also print the intermediate frames of swaps and insertions.
        #[arg(long)]
        motion: bool,
    },
    /// Record an algorithm over the given values and print its steps.
    Trace {
        algorithm: String,
        /// Comma-separated values, e.g. `5,3,8,1`.
        #[arg(long, value_delimiter = ',')]
        values: Vec<Value>,
    },
    /// Print the known algorithm identifiers.
    List,
    /// Write a config file with the default pacing.
    Init {
        #[arg(long, default_value = "sortviz.toml")]
        config: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            algorithm,
            config,
            seed,
            count,
            motion,
        } => cmd_run(&algorithm, &config, seed, count, motion),
        Command::Trace { algorithm, values } => cmd_trace(&algorithm, values),
        Command::Init { config, force } => {
            init_config(&config, force)?;
            println!("wrote {}", config.display());
            Ok(exit_codes::OK)
        }
        Command::List => {
            for algorithm in Algorithm::ALL {
                println!("{algorithm}");
            }
            Ok(exit_codes::OK)
        }
    }
}

fn cmd_run(
    algorithm: &str,
    config_path: &Path,
    seed: Option<u64>,
    count: Option<usize>,
    motion: bool,
) -> Result<i32> {
    let mut cfg = load_config(config_path)?;
    if seed.is_some() {
        cfg.seed = seed;
    }
    if let Some(count) = count {
        cfg.element_count = count;
    }
    cfg.validate()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("build tokio runtime")?;

    // Spawning needs the runtime context.
    let _guard = runtime.enter();
    let mut controller = RunController::new(cfg, TerminalRenderer::stdout(motion));
    controller.start(algorithm)?;

    match runtime.block_on(controller.wait()) {
        Some(Ok(run)) => {
            info!(run = %run.id, steps = run.steps.len(), "done");
            Ok(exit_codes::OK)
        }
        Some(Err(err)) => {
            eprintln!("run aborted: {err}");
            Ok(failure_code(&err))
        }
        None => Ok(exit_codes::OK),
    }
}

fn cmd_trace(algorithm: &str, values: Vec<Value>) -> Result<i32> {
    let algorithm: Algorithm = algorithm.parse()?;
    if let Some(value) = values.iter().find(|value| **value > MAX_VALUE) {
        bail!("value {value} exceeds {MAX_VALUE}");
    }
    let run = match record(algorithm, Sequence::from_values(values)) {
        Ok(run) => run,
        Err(err) => {
            eprintln!("trace aborted: {err}");
            return Ok(failure_code(&err));
        }
    };
    let mut payload = serde_json::to_string_pretty(&run).context("serialize trace")?;
    payload.push('\n');
    print!("{payload}");
    Ok(exit_codes::OK)
}

/// Exit code for a run that ended in `err`.
fn failure_code(err: &SortError) -> i32 {
    match err {
        SortError::UnknownAlgorithm(_) | SortError::TagCountMismatch { .. } => exit_codes::INVALID,
        _ => exit_codes::ABORTED,
    }
}
