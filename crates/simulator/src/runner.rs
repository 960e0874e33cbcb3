//! Simulator facade: resolve, load, run, write.

use crate::input::{load_scenario, resolve_path};
use crate::output::write_transcript;
use crate::{SimulatorConfig, SimulatorError};
use alertsim_scenario::Scenario;
use alertsim_simulation::{SimulationReport, SimulationRunner};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Runs one scenario end to end.
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a simulator.
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Simulate an already loaded scenario.
    pub fn simulate(&self, scenario: &Scenario) -> Result<SimulationReport, SimulatorError> {
        let runner = SimulationRunner::from_scenario(scenario, self.config.simulation.clone())?;
        Ok(runner.run()?)
    }

    /// Resolve the scenario (reading its path from `input` if configured),
    /// simulate it, and write the transcript to `output`.
    pub fn run_with(
        &self,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<SimulationReport, SimulatorError> {
        let path = resolve_path(&self.config.input, input)?;
        let scenario = load_scenario(&path)?;

        info!(
            path = %path.display(),
            horizon = scenario.horizon,
            devices = scenario.devices.len(),
            "Starting simulation"
        );

        let report = self.simulate(&scenario)?;
        write_transcript(&report.transcript, output)?;
        Ok(report)
    }

    /// Like [`run_with`](Self::run_with), but a missing scenario file is not
    /// an error: `FILE NOT FOUND` is written to `output` and `None` returned.
    pub fn execute(
        &self,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<Option<SimulationReport>, SimulatorError> {
        match self.run_with(input, output) {
            Ok(report) => Ok(Some(report)),
            Err(SimulatorError::FileNotFound(path)) => {
                warn!(path = %path.display(), "Scenario file not found");
                writeln!(output, "FILE NOT FOUND")?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
