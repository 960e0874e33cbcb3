//! Applying one delivered signal to the network.
//!
//! A delivered signal is logged (relays only), applied to the target's
//! [`DeviceStates`], and, if the state actually changed, relayed to every
//! neighbor in link declaration order. Sends are stamped with the sending
//! tick, not the delivery tick.

use crate::{DeviceStates, EventQueue, LogEntry, ScheduledSignal, SimulationError, Transcript};
use alertsim_types::{SignalKind, Tick, Topology};
use tracing::trace;

/// What happened to a delivered signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The description became (or stayed) active and was relayed.
    Activated {
        /// Number of relays queued.
        fan_out: usize,
    },
    /// The description was suppressed and the cancellation relayed.
    Cancelled {
        /// Number of relays queued.
        fan_out: usize,
    },
    /// No state transition; nothing was relayed.
    Absorbed,
}

impl Outcome {
    /// Number of relays queued.
    pub fn fan_out(&self) -> usize {
        match self {
            Outcome::Activated { fan_out } | Outcome::Cancelled { fan_out } => *fan_out,
            Outcome::Absorbed => 0,
        }
    }
}

/// Process `signal` at tick `now`.
///
/// Relays are pushed onto `queue` and log lines appended to `transcript`.
pub fn apply(
    signal: &ScheduledSignal,
    now: Tick,
    topology: &impl Topology,
    states: &mut DeviceStates,
    queue: &mut EventQueue,
    transcript: &mut Transcript,
) -> Result<Outcome, SimulationError> {
    let device = signal.target;

    if let Some(origin) = signal.origin {
        transcript.push(LogEntry::Received {
            tick: now,
            device,
            kind: signal.kind,
            origin,
            description: signal.description.clone(),
        });
    }

    let transitioned = match signal.kind {
        SignalKind::Alert => states.try_activate(device, &signal.description)?,
        SignalKind::Cancel => states.try_cancel(device, &signal.description)?,
    };

    if !transitioned {
        trace!(
            tick = now,
            device = %device,
            kind = %signal.kind,
            description = %signal.description,
            "Signal absorbed"
        );
        return Ok(Outcome::Absorbed);
    }

    let neighbors = topology.neighbors(device);
    for link in neighbors {
        queue.push(ScheduledSignal::relay(
            now.saturating_add(link.delay),
            signal.kind,
            link.destination,
            device,
            signal.description.clone(),
        ));
        transcript.push(LogEntry::Sent {
            tick: now,
            device,
            kind: signal.kind,
            neighbor: link.destination,
            description: signal.description.clone(),
        });
    }

    trace!(
        tick = now,
        device = %device,
        kind = %signal.kind,
        fan_out = neighbors.len(),
        "Signal relayed"
    );

    let fan_out = neighbors.len();
    Ok(match signal.kind {
        SignalKind::Alert => Outcome::Activated { fan_out },
        SignalKind::Cancel => Outcome::Cancelled { fan_out },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RelayPolicy;
    use alertsim_types::{Description, DeviceId, Link, StaticTopology};

    struct Fixture {
        topology: StaticTopology,
        states: DeviceStates,
        queue: EventQueue,
        transcript: Transcript,
    }

    impl Fixture {
        /// Device 1 fans out to 2, 3 and 4; device 4 has no outgoing links.
        fn new() -> Self {
            let devices = [DeviceId(1), DeviceId(2), DeviceId(3), DeviceId(4)];
            let topology = StaticTopology::new(
                devices,
                [
                    Link::new(DeviceId(1), DeviceId(3), 10),
                    Link::new(DeviceId(1), DeviceId(2), 0),
                    Link::new(DeviceId(1), DeviceId(4), 5),
                ],
            )
            .unwrap();
            Self {
                topology,
                states: DeviceStates::new(devices, RelayPolicy::RelayOnce),
                queue: EventQueue::new(),
                transcript: Transcript::new(),
            }
        }

        fn apply(&mut self, signal: &ScheduledSignal) -> Result<Outcome, SimulationError> {
            apply(
                signal,
                signal.time,
                &self.topology,
                &mut self.states,
                &mut self.queue,
                &mut self.transcript,
            )
        }
    }

    fn fire() -> Description {
        Description::new("Fire")
    }

    #[test]
    fn test_fan_out_completeness() {
        let mut fx = Fixture::new();
        let outcome = fx
            .apply(&ScheduledSignal::external(
                100,
                SignalKind::Alert,
                DeviceId(1),
                fire(),
            ))
            .unwrap();

        assert_eq!(outcome, Outcome::Activated { fan_out: 3 });
        assert_eq!(fx.queue.len(), 3);

        // SENT lines follow link declaration order, stamped with the sending tick.
        assert_eq!(
            fx.transcript.lines(),
            vec![
                "@100: #1 SENT ALERT TO #3: Fire",
                "@100: #1 SENT ALERT TO #2: Fire",
                "@100: #1 SENT ALERT TO #4: Fire",
            ]
        );

        let mut deliveries = Vec::new();
        while let Ok(s) = fx.queue.pop_min() {
            assert_eq!(s.origin, Some(DeviceId(1)));
            deliveries.push((s.time, s.target));
        }
        assert_eq!(
            deliveries,
            vec![
                (100, DeviceId(2)),
                (105, DeviceId(4)),
                (110, DeviceId(3)),
            ]
        );
    }

    #[test]
    fn test_external_signal_not_logged_as_received() {
        let mut fx = Fixture::new();
        fx.apply(&ScheduledSignal::external(
            0,
            SignalKind::Alert,
            DeviceId(4),
            fire(),
        ))
        .unwrap();
        assert!(fx.transcript.is_empty());
    }

    #[test]
    fn test_relay_logged_as_received_without_fan_out() {
        let mut fx = Fixture::new();
        let outcome = fx
            .apply(&ScheduledSignal::relay(
                7,
                SignalKind::Alert,
                DeviceId(4),
                DeviceId(1),
                fire(),
            ))
            .unwrap();

        assert_eq!(outcome, Outcome::Activated { fan_out: 0 });
        assert_eq!(
            fx.transcript.lines(),
            vec!["@7: #4 RECEIVED ALERT FROM #1: Fire"]
        );
        assert!(fx.queue.is_empty());
    }

    #[test]
    fn test_absorbed_signals_do_not_propagate() {
        let mut fx = Fixture::new();

        // Cancel with nothing active.
        let outcome = fx
            .apply(&ScheduledSignal::external(
                0,
                SignalKind::Cancel,
                DeviceId(1),
                fire(),
            ))
            .unwrap();
        assert_eq!(outcome, Outcome::Absorbed);
        assert!(fx.queue.is_empty());

        // Second alert is absorbed, even though it still logs its receipt.
        fx.apply(&ScheduledSignal::external(1, SignalKind::Alert, DeviceId(1), fire()))
            .unwrap();
        let sent_before = fx.queue.len();
        let outcome = fx
            .apply(&ScheduledSignal::relay(
                2,
                SignalKind::Alert,
                DeviceId(1),
                DeviceId(2),
                fire(),
            ))
            .unwrap();
        assert_eq!(outcome, Outcome::Absorbed);
        assert_eq!(fx.queue.len(), sent_before);
        assert_eq!(
            fx.transcript.entries().last().map(ToString::to_string),
            Some("@2: #1 RECEIVED ALERT FROM #2: Fire".to_string())
        );
    }

    #[test]
    fn test_cancellation_fans_out_once() {
        let mut fx = Fixture::new();
        fx.apply(&ScheduledSignal::external(0, SignalKind::Alert, DeviceId(1), fire()))
            .unwrap();
        let outcome = fx
            .apply(&ScheduledSignal::external(
                5,
                SignalKind::Cancel,
                DeviceId(1),
                fire(),
            ))
            .unwrap();
        assert_eq!(outcome, Outcome::Cancelled { fan_out: 3 });
        assert_eq!(outcome.fan_out(), 3);

        let outcome = fx
            .apply(&ScheduledSignal::external(
                6,
                SignalKind::Cancel,
                DeviceId(1),
                fire(),
            ))
            .unwrap();
        assert_eq!(outcome, Outcome::Absorbed);
    }

    #[test]
    fn test_unknown_target_fails() {
        let mut fx = Fixture::new();
        let err = fx
            .apply(&ScheduledSignal::external(
                0,
                SignalKind::Alert,
                DeviceId(9),
                fire(),
            ))
            .unwrap_err();
        assert_eq!(err, SimulationError::UnknownDevice(DeviceId(9)));
    }
}
