//! Tick-driven simulation driver.

use crate::propagation::{self, Outcome};
use crate::{
    DeviceStates, EventQueue, LogEntry, ScheduledSignal, SimulationConfig, SimulationError,
    Transcript,
};
use alertsim_scenario::Scenario;
use alertsim_types::{Description, DeviceId, SignalKind, StaticTopology, Tick, Topology};
use tracing::{debug, info, trace};

/// Statistics collected during simulation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationStats {
    /// Total signals delivered and processed.
    pub signals_processed: u64,
    /// Signals that arrived from another device.
    pub relays_received: u64,
    /// Relays queued (one per SENT line).
    pub signals_sent: u64,
    /// Deliveries that activated a description.
    pub activations: u64,
    /// Deliveries that suppressed a description.
    pub cancellations: u64,
    /// Deliveries that changed nothing.
    pub absorbed: u64,
    /// Signals still queued when the horizon was reached.
    pub dropped_at_horizon: u64,
}

impl SimulationStats {
    fn record(&mut self, signal: &ScheduledSignal, outcome: Outcome) {
        self.signals_processed += 1;
        if signal.is_relay() {
            self.relays_received += 1;
        }
        self.signals_sent += outcome.fan_out() as u64;
        match outcome {
            Outcome::Activated { .. } => self.activations += 1,
            Outcome::Cancelled { .. } => self.cancellations += 1,
            Outcome::Absorbed => self.absorbed += 1,
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Every line produced, ending with the END line.
    pub transcript: Transcript,
    /// Run statistics.
    pub stats: SimulationStats,
    /// Final per-device state.
    pub states: DeviceStates,
}

/// Deterministic simulation runner.
///
/// Owns the topology, the device states and the event queue for the whole
/// run. The clock starts at tick 0; at each tick every signal due at or
/// before that tick is processed, including signals scheduled during the
/// same tick by zero-delay links. The run stops at the horizon without
/// draining it: signals due at the horizon or later are dropped.
pub struct SimulationRunner<T: Topology = StaticTopology> {
    topology: T,
    states: DeviceStates,
    event_queue: EventQueue,
    transcript: Transcript,
    /// Current simulation time.
    now: Tick,
    horizon: Tick,
    config: SimulationConfig,
    stats: SimulationStats,
}

impl SimulationRunner<StaticTopology> {
    /// Create a runner for a parsed scenario, seeding its initial signals.
    pub fn from_scenario(
        scenario: &Scenario,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        let topology = scenario.topology()?;
        let mut runner = Self::new(topology, scenario.horizon, config)?;
        for signal in &scenario.signals {
            runner.schedule_initial_signal(
                signal.device,
                signal.description.clone(),
                signal.time,
                signal.kind,
            )?;
        }
        Ok(runner)
    }
}

impl<T: Topology> SimulationRunner<T> {
    /// Create a runner over `topology` terminating at `horizon`.
    ///
    /// Fails if any link leads to an undeclared device.
    pub fn new(
        topology: T,
        horizon: Tick,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        for &device in topology.devices() {
            if let Some(link) = topology
                .neighbors(device)
                .iter()
                .find(|link| !topology.contains(link.destination))
            {
                return Err(SimulationError::UnknownDevice(link.destination));
            }
        }

        let states = DeviceStates::new(topology.devices().iter().copied(), config.relay_policy);

        info!(
            devices = topology.device_count(),
            links = topology.link_count(),
            horizon,
            relay_policy = ?config.relay_policy,
            "Created simulation runner"
        );

        Ok(Self {
            topology,
            states,
            event_queue: EventQueue::new(),
            transcript: Transcript::new(),
            now: 0,
            horizon,
            config,
            stats: SimulationStats::default(),
        })
    }

    /// Inject a signal from outside the network.
    ///
    /// Fails if `device` was never declared.
    pub fn schedule_initial_signal(
        &mut self,
        device: DeviceId,
        description: Description,
        time: Tick,
        kind: SignalKind,
    ) -> Result<(), SimulationError> {
        self.topology.lookup(device)?;
        self.event_queue
            .push(ScheduledSignal::external(time, kind, device, description));
        Ok(())
    }

    /// Get current simulation time.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Tick at which the run terminates.
    pub fn horizon(&self) -> Tick {
        self.horizon
    }

    /// Get simulation statistics.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Current per-device state.
    pub fn states(&self) -> &DeviceStates {
        &self.states
    }

    /// Lines produced so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Number of signals still queued.
    pub fn pending_signals(&self) -> usize {
        self.event_queue.len()
    }

    /// Process every tick before `end` (capped at the horizon).
    ///
    /// Ticks with nothing due are skipped in one step; the result is the same
    /// as visiting each of them.
    pub fn run_until(&mut self, end: Tick) -> Result<(), SimulationError> {
        let end = end.min(self.horizon);
        trace!(from = self.now, end, "Running simulation step");

        while self.now < end {
            self.drain_tick()?;

            // Everything left is due after `now`.
            self.now = self
                .event_queue
                .peek_min_time()
                .map_or(end, |next| next.min(end));
        }
        Ok(())
    }

    /// Run to the horizon and emit the END line.
    pub fn run(mut self) -> Result<SimulationReport, SimulationError> {
        self.run_until(self.horizon)?;

        self.stats.dropped_at_horizon = self.event_queue.len() as u64;
        if !self.event_queue.is_empty() {
            debug!(
                remaining_signals = self.event_queue.len(),
                "Horizon reached"
            );
        }
        self.transcript.push(LogEntry::End { tick: self.horizon });

        info!(
            horizon = self.horizon,
            processed = self.stats.signals_processed,
            sent = self.stats.signals_sent,
            dropped = self.stats.dropped_at_horizon,
            "Simulation finished"
        );

        Ok(SimulationReport {
            transcript: self.transcript,
            stats: self.stats,
            states: self.states,
        })
    }

    /// Process every signal due at or before `now`, including ones scheduled
    /// while draining.
    fn drain_tick(&mut self) -> Result<(), SimulationError> {
        let mut processed_this_tick = 0usize;

        while let Some(signal) = self.event_queue.pop_due(self.now) {
            processed_this_tick += 1;
            if processed_this_tick > self.config.max_signals_per_tick {
                return Err(SimulationError::TickBudgetExceeded {
                    tick: self.now,
                    limit: self.config.max_signals_per_tick,
                });
            }

            trace!(
                time = self.now,
                device = %signal.target,
                kind = %signal.kind,
                "Processing signal"
            );

            let outcome = propagation::apply(
                &signal,
                self.now,
                &self.topology,
                &mut self.states,
                &mut self.event_queue,
                &mut self.transcript,
            )?;
            self.stats.record(&signal, outcome);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RelayPolicy, SignalState};
    use tracing_test::traced_test;

    fn chain(horizon: Tick) -> Scenario {
        Scenario::new(horizon)
            .with_device(1)
            .with_device(2)
            .with_device(3)
            .with_link(1, 2, 5)
            .with_link(2, 3, 5)
    }

    fn run(scenario: &Scenario) -> SimulationReport {
        SimulationRunner::from_scenario(scenario, SimulationConfig::default())
            .unwrap()
            .run()
            .unwrap()
    }

    #[traced_test]
    #[test]
    fn test_empty_run_emits_only_end() {
        let report = run(&Scenario::new(10).with_device(1));
        assert_eq!(report.transcript.to_string(), "@10: END\n");
        assert_eq!(report.stats, SimulationStats::default());
        assert!(logs_contain("Created simulation runner"));
        assert!(logs_contain("Simulation finished"));
    }

    #[test]
    fn test_zero_horizon_processes_nothing() {
        let report = run(&chain(0).with_alert(1, "Fire", 0));
        assert_eq!(report.transcript.lines(), vec!["@0: END"]);
        assert_eq!(report.stats.dropped_at_horizon, 1);
    }

    #[test]
    fn test_horizon_boundary() {
        // Delivery to 3 lands at tick 10 == horizon and is dropped.
        let report = run(&chain(10).with_alert(1, "Fire", 0));
        assert_eq!(
            report.transcript.lines(),
            vec![
                "@0: #1 SENT ALERT TO #2: Fire",
                "@5: #2 RECEIVED ALERT FROM #1: Fire",
                "@5: #2 SENT ALERT TO #3: Fire",
                "@10: END",
            ]
        );
        assert_eq!(report.stats.dropped_at_horizon, 1);

        // One tick later it is processed.
        let report = run(&chain(11).with_alert(1, "Fire", 0));
        assert_eq!(
            report.transcript.entries()[3].to_string(),
            "@10: #3 RECEIVED ALERT FROM #2: Fire"
        );
        assert_eq!(report.stats.dropped_at_horizon, 0);
    }

    #[test]
    fn test_initial_signal_at_horizon_minus_one() {
        let report = run(&chain(5).with_alert(1, "Fire", 4));
        assert_eq!(
            report.transcript.lines(),
            vec!["@4: #1 SENT ALERT TO #2: Fire", "@5: END"]
        );
    }

    #[test]
    fn test_maximal_delay_is_dropped_at_horizon() {
        let scenario = Scenario::parse(
            "LENGTH 10\nDEVICE 1\nDEVICE 2\nPROPAGATE 1 2 18446744073709551615\nALERT 1 Fire 1\n",
        )
        .unwrap();
        let report = run(&scenario);
        assert_eq!(
            report.transcript.lines(),
            vec!["@1: #1 SENT ALERT TO #2: Fire", "@10: END"]
        );
        assert_eq!(report.stats.relays_received, 0);
        assert_eq!(report.stats.dropped_at_horizon, 1);
        assert_eq!(
            report.states.state_of(DeviceId(2), "Fire").unwrap(),
            SignalState::Unseen
        );
    }

    #[test]
    fn test_same_tick_alert_fans_out_before_cancel() {
        // Declared cancel first; the alert still wins the tie at tick 3.
        let report = run(&chain(20).with_cancel(1, "Fire", 3).with_alert(1, "Fire", 3));
        assert_eq!(
            report.transcript.lines(),
            vec![
                "@3: #1 SENT ALERT TO #2: Fire",
                "@3: #1 SENT CANCELLATION TO #2: Fire",
                "@8: #2 RECEIVED ALERT FROM #1: Fire",
                "@8: #2 SENT ALERT TO #3: Fire",
                "@8: #2 RECEIVED CANCELLATION FROM #1: Fire",
                "@8: #2 SENT CANCELLATION TO #3: Fire",
                "@13: #3 RECEIVED ALERT FROM #2: Fire",
                "@13: #3 RECEIVED CANCELLATION FROM #2: Fire",
                "@20: END",
            ]
        );
        assert_eq!(report.stats.activations, 3);
        assert_eq!(report.stats.cancellations, 3);
        assert_eq!(report.stats.absorbed, 0);
    }

    #[test]
    fn test_zero_delay_chain_runs_within_one_tick() {
        let scenario = Scenario::new(3)
            .with_device(1)
            .with_device(2)
            .with_device(3)
            .with_link(1, 2, 0)
            .with_link(2, 3, 0)
            .with_alert(1, "Fire", 1);
        let report = run(&scenario);
        assert!(report.transcript.iter().take(4).all(|e| e.tick() == 1));
        assert_eq!(
            report.states.state_of(DeviceId(3), "Fire"),
            Ok(SignalState::Active)
        );
    }

    #[test]
    fn test_zero_delay_cycle_settles_under_relay_once() {
        let scenario = Scenario::new(5)
            .with_device(1)
            .with_device(2)
            .with_link(1, 2, 0)
            .with_link(2, 1, 0)
            .with_alert(1, "Fire", 0);
        let report = run(&scenario);
        assert_eq!(
            report.transcript.lines(),
            vec![
                "@0: #1 SENT ALERT TO #2: Fire",
                "@0: #2 RECEIVED ALERT FROM #1: Fire",
                "@0: #2 SENT ALERT TO #1: Fire",
                "@0: #1 RECEIVED ALERT FROM #2: Fire",
                "@5: END",
            ]
        );
    }

    #[test]
    fn test_zero_delay_cycle_trips_tick_budget() {
        let scenario = Scenario::new(5)
            .with_device(1)
            .with_device(2)
            .with_link(1, 2, 0)
            .with_link(2, 1, 0)
            .with_alert(1, "Fire", 2);
        let config = SimulationConfig::default()
            .with_relay_policy(RelayPolicy::RelayEveryAlert)
            .with_max_signals_per_tick(100);
        let err = SimulationRunner::from_scenario(&scenario, config)
            .unwrap()
            .run()
            .unwrap_err();
        assert_eq!(
            err,
            SimulationError::TickBudgetExceeded {
                tick: 2,
                limit: 100
            }
        );
    }

    #[test]
    fn test_unknown_device_rejected_before_run() {
        let mut scenario = chain(10);
        scenario
            .links
            .push(alertsim_types::Link::new(DeviceId(3), DeviceId(8), 1));
        assert_eq!(
            SimulationRunner::from_scenario(&scenario, SimulationConfig::default()).err(),
            Some(SimulationError::UnknownDevice(DeviceId(8)))
        );

        let scenario = chain(10).with_alert(7, "Fire", 0);
        assert_eq!(
            SimulationRunner::from_scenario(&scenario, SimulationConfig::default()).err(),
            Some(SimulationError::UnknownDevice(DeviceId(7)))
        );
    }

    #[test]
    fn test_run_until_is_incremental() {
        let scenario = chain(100).with_alert(1, "Fire", 0);
        let mut runner =
            SimulationRunner::from_scenario(&scenario, SimulationConfig::default()).unwrap();

        runner.run_until(5).unwrap();
        assert_eq!(runner.now(), 5);
        assert_eq!(runner.transcript().len(), 1);
        assert_eq!(runner.pending_signals(), 1);

        runner.run_until(6).unwrap();
        assert_eq!(runner.transcript().len(), 3);

        let report = runner.run().unwrap();
        assert_eq!(report.transcript.len(), 5);
        assert_eq!(report.stats.signals_processed, 3);
        assert_eq!(report.stats.relays_received, 2);
        assert_eq!(report.stats.signals_sent, 2);
        assert_eq!(report.stats.activations, 3);
    }

    #[test]
    fn test_run_until_never_passes_horizon() {
        let mut runner =
            SimulationRunner::from_scenario(&chain(10), SimulationConfig::default()).unwrap();
        runner.run_until(1_000).unwrap();
        assert_eq!(runner.now(), 10);
        assert_eq!(runner.horizon(), 10);
    }
}
