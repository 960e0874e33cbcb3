//! Scenario loading.
//!
//! A scenario is the complete input of one simulation run: the horizon, the
//! declared devices, the propagation links between them and the signals
//! injected from outside the network.
//!
//! # Format
//!
//! One record per line, whitespace-separated:
//!
//! ```text
//! LENGTH 9999
//! DEVICE 1
//! DEVICE 2
//! PROPAGATE 1 2 750
//! ALERT 1 Trouble 0
//! CANCEL 1 Trouble 2200
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Records may appear in
//! any order; cross-references are checked once the whole input is read.

mod error;
mod parser;

pub use error::ScenarioError;
pub use parser::{InitialSignal, Scenario};
