//! Configuration for a simulation run.

/// Default cap on signals processed within a single tick.
pub const DEFAULT_MAX_SIGNALS_PER_TICK: usize = 1_000_000;

/// When an ALERT for an already-active description is relayed again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelayPolicy {
    /// Relay only on the first activation of a description.
    ///
    /// A repeated ALERT for an active description is absorbed, so zero-delay
    /// cycles settle on their own.
    #[default]
    RelayOnce,

    /// Relay every ALERT that is not suppressed, even if already active.
    ///
    /// Zero-delay cycles never settle under this policy and are stopped by
    /// the per-tick signal cap.
    RelayEveryAlert,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Re-activation behavior for active descriptions.
    pub relay_policy: RelayPolicy,

    /// Maximum signals processed within one tick before the run is aborted.
    ///
    /// Guards against unbounded same-tick chains through zero-delay cycles.
    pub max_signals_per_tick: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            relay_policy: RelayPolicy::default(),
            max_signals_per_tick: DEFAULT_MAX_SIGNALS_PER_TICK,
        }
    }
}

impl SimulationConfig {
    /// Set the relay policy.
    pub fn with_relay_policy(mut self, relay_policy: RelayPolicy) -> Self {
        self.relay_policy = relay_policy;
        self
    }

    /// Set the per-tick signal cap.
    pub fn with_max_signals_per_tick(mut self, limit: usize) -> Self {
        self.max_signals_per_tick = limit.max(1);
        self
    }
}
