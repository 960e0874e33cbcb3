//! Reference scenarios with known transcripts.

use alertsim_scenario::Scenario;

/// Four devices in a ring: 1 -> 2 -> 3 -> 4 -> 1.
///
/// Device 1 raises `Trouble` at tick 0 and cancels it at tick 2200. The alert
/// comes back round to device 1 after the cancellation and is absorbed there.
pub const RING_INPUT: &str = "\
# Four devices in a ring
LENGTH 9999

DEVICE 1
DEVICE 2
DEVICE 3
DEVICE 4

PROPAGATE 1 2 750
PROPAGATE 2 3 1250
PROPAGATE 3 4 500
PROPAGATE 4 1 1000

ALERT 1 Trouble 0
CANCEL 1 Trouble 2200
";

/// Exact transcript produced by [`RING_INPUT`].
pub const RING_TRANSCRIPT: &str = "\
@0: #1 SENT ALERT TO #2: Trouble
@750: #2 RECEIVED ALERT FROM #1: Trouble
@750: #2 SENT ALERT TO #3: Trouble
@2000: #3 RECEIVED ALERT FROM #2: Trouble
@2000: #3 SENT ALERT TO #4: Trouble
@2200: #1 SENT CANCELLATION TO #2: Trouble
@2500: #4 RECEIVED ALERT FROM #3: Trouble
@2500: #4 SENT ALERT TO #1: Trouble
@2950: #2 RECEIVED CANCELLATION FROM #1: Trouble
@2950: #2 SENT CANCELLATION TO #3: Trouble
@3500: #1 RECEIVED ALERT FROM #4: Trouble
@4200: #3 RECEIVED CANCELLATION FROM #2: Trouble
@4200: #3 SENT CANCELLATION TO #4: Trouble
@4700: #4 RECEIVED CANCELLATION FROM #3: Trouble
@4700: #4 SENT CANCELLATION TO #1: Trouble
@5700: #1 RECEIVED CANCELLATION FROM #4: Trouble
@9999: END
";

/// The ring scenario built in code; equal to parsing [`RING_INPUT`].
pub fn ring_scenario() -> Scenario {
    Scenario::new(9999)
        .with_device(1)
        .with_device(2)
        .with_device(3)
        .with_device(4)
        .with_link(1, 2, 750)
        .with_link(2, 3, 1250)
        .with_link(3, 4, 500)
        .with_link(4, 1, 1000)
        .with_alert(1, "Trouble", 0)
        .with_cancel(1, "Trouble", 2200)
}
