//! Error types for the simulator.

use alertsim_scenario::ScenarioError;
use alertsim_simulation::SimulationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from a simulator invocation.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// The scenario path does not name an existing file.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The scenario could not be loaded.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    /// The simulation aborted.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Reading the path or writing the transcript failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
