//! Alert Propagation Simulator
//!
//! The outer surface around `alertsim-simulation`:
//!
//! - **Input**: resolve the scenario path (argument, or one line read from stdin)
//! - **Loading**: parse the scenario file
//! - **Output**: stream the transcript to any writer
//!
//! # Example
//!
//! ```ignore
//! use alertsim_simulator::{Simulator, SimulatorConfig};
//!
//! let simulator = Simulator::new(SimulatorConfig::from_path("ring.txt"));
//! let stdin = std::io::stdin();
//! let stdout = std::io::stdout();
//! simulator.run_with(&mut stdin.lock(), &mut stdout.lock())?;
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod runner;

pub use config::{InputSource, SimulatorConfig};
pub use error::SimulatorError;
pub use runner::Simulator;
