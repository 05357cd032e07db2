//! Runs the policy × workload matrix and prints one JSON result per line.
//!
//! Usage: `cachelab [CONFIG.json]`
//!
//! Without a path the built-in defaults are used. Logging goes to stderr and
//! is controlled by `RUST_LOG` (default `info`).

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use cachelab::config::LabConfig;
use cachelab::error::ConfigError;
use cachelab::harness::Harness;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    init_tracing();

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "lab run failed");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(config_path: Option<String>) -> Result<(), ConfigError> {
    let config = match config_path {
        Some(path) => {
            info!(%path, "loading configuration");
            LabConfig::load(&path)?
        },
        None => LabConfig::default(),
    };

    let sequences = config.sequences()?;
    let harness = Harness::new(config.harness)?;
    info!(
        policies = config.policies.len(),
        workloads = sequences.len(),
        capacity = config.harness.capacity,
        "starting matrix"
    );

    #[cfg(feature = "concurrency")]
    let reports = harness.run_matrix_parallel(&config.policies, &sequences)?;
    #[cfg(not(feature = "concurrency"))]
    let reports = harness.run_matrix(&config.policies, &sequences)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for report in &reports {
        for tuple in report.tuples() {
            serde_json::to_writer(&mut out, &tuple)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}
