//! Core types for alert propagation simulation.
//!
//! This crate provides the foundational types shared by the scenario loader,
//! the simulation engine and the simulator CLI:
//!
//! - **Identifiers**: DeviceId, Tick
//! - **Signals**: SignalKind, Description
//! - **Topology**: Link, the `Topology` trait and `StaticTopology`
//!
//! # Design Philosophy
//!
//! This crate is self-contained with minimal dependencies. It does not depend on
//! any other workspace crates, making it the foundation layer.

mod identifiers;
mod signal;
mod topology;

pub use identifiers::{DeviceId, Tick};
pub use signal::{Description, SignalKind};
pub use topology::{Link, StaticTopology, Topology, TopologyError};
