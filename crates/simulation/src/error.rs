//! Error types for the simulation engine.

use alertsim_types::{DeviceId, Tick, TopologyError};
use thiserror::Error;

/// Errors that abort a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// A link or signal references a device that was never declared.
    #[error("device {0} was never declared")]
    UnknownDevice(DeviceId),

    /// Pop was called on an empty event queue.
    #[error("pop from empty event queue")]
    EmptyQueue,

    /// Too many signals were processed within one tick.
    #[error("more than {limit} signals processed at tick {tick}; zero-delay cycle?")]
    TickBudgetExceeded {
        /// Tick being drained.
        tick: Tick,
        /// Configured cap.
        limit: usize,
    },

    /// The topology could not be built.
    #[error("invalid topology: {0}")]
    Topology(TopologyError),
}

impl From<TopologyError> for SimulationError {
    fn from(err: TopologyError) -> Self {
        match err {
            TopologyError::UnknownDevice(device) => SimulationError::UnknownDevice(device),
            other => SimulationError::Topology(other),
        }
    }
}
