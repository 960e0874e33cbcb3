//! Configuration types for the simulator.

use alertsim_simulation::{RelayPolicy, SimulationConfig};
use std::path::PathBuf;

/// Where the scenario path comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// A path given up front.
    Path(PathBuf),

    /// A single line read from the input stream, naming the path.
    Prompt,
}

/// Configuration for a simulator invocation.
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Where to find the scenario.
    pub input: InputSource,

    /// Engine configuration.
    pub simulation: SimulationConfig,
}

impl SimulatorConfig {
    /// Read the scenario path from the input stream.
    pub fn prompt() -> Self {
        Self {
            input: InputSource::Prompt,
            simulation: SimulationConfig::default(),
        }
    }

    /// Read the scenario from `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            input: InputSource::Path(path.into()),
            simulation: SimulationConfig::default(),
        }
    }

    /// Set the relay policy.
    pub fn with_relay_policy(mut self, relay_policy: RelayPolicy) -> Self {
        self.simulation = self.simulation.with_relay_policy(relay_policy);
        self
    }

    /// Set the per-tick signal cap.
    pub fn with_max_signals_per_tick(mut self, limit: usize) -> Self {
        self.simulation = self.simulation.with_max_signals_per_tick(limit);
        self
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::prompt()
    }
}
