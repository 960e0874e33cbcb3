//! Alert Propagation Simulator CLI
//!
//! Runs a scenario file and prints its transcript.
//!
//! # Example
//!
//! ```bash
//! # Path as an argument
//! alertsim samples/ring.txt
//!
//! # Path read from stdin
//! echo samples/ring.txt | alertsim
//! ```

use alertsim_simulation::RelayPolicy;
use alertsim_simulator::{Simulator, SimulatorConfig};
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Alert Propagation Simulator
///
/// Simulates ALERT and CANCEL signals travelling over delayed device links
/// and prints every send and receipt in time order.
#[derive(Parser, Debug)]
#[command(name = "alertsim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Scenario file. When omitted, the path is read from the first line of stdin.
    input: Option<PathBuf>,

    /// Whether repeated alerts for an active description are relayed again
    #[arg(long, value_enum, default_value_t = Policy::Once)]
    relay_policy: Policy,

    /// Abort if more signals than this are processed within one tick
    #[arg(long, default_value_t = alertsim_simulation::DEFAULT_MAX_SIGNALS_PER_TICK)]
    max_signals_per_tick: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    /// Relay only the first activation
    Once,
    /// Relay every non-suppressed alert
    EveryAlert,
}

impl From<Policy> for RelayPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Once => RelayPolicy::RelayOnce,
            Policy::EveryAlert => RelayPolicy::RelayEveryAlert,
        }
    }
}

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries only the transcript.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,alertsim_simulator=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.input {
        Some(path) => SimulatorConfig::from_path(path),
        None => SimulatorConfig::prompt(),
    }
    .with_relay_policy(args.relay_policy.into())
    .with_max_signals_per_tick(args.max_signals_per_tick);

    let simulator = Simulator::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();

    match simulator.execute(&mut stdin.lock(), &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Simulation failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
