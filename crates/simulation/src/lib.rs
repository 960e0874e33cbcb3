//! Deterministic alert propagation engine.
//!
//! Devices receive ALERT or CANCEL signals at scheduled ticks and relay them
//! to their neighbors after a per-link delay. Given the same scenario, a run
//! produces a byte-identical transcript every time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  SimulationRunner                       │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     EventQueue (BinaryHeap<Reverse<Signal>>)       │ │
//! │  │     Ordered by: time, kind, target, origin, text   │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │ signals due at `now`        │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     propagation::apply                             │ │
//! │  │     DeviceStates transition, then fan-out over     │ │
//! │  │     Topology neighbors                             │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     relays pushed back, lines appended to          │ │
//! │  │     Transcript                                     │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod config;
mod device_state;
mod error;
mod event_queue;
mod propagation;
mod runner;
mod transcript;

pub use config::{RelayPolicy, SimulationConfig, DEFAULT_MAX_SIGNALS_PER_TICK};
pub use device_state::{DeviceState, DeviceStates, SignalState};
pub use error::SimulationError;
pub use event_queue::{EventQueue, ScheduledSignal};
pub use propagation::{apply, Outcome};
pub use runner::{SimulationReport, SimulationRunner, SimulationStats};
pub use transcript::{LogEntry, Transcript};
