//! Event queue with deterministic ordering.

use crate::SimulationError;
use alertsim_types::{Description, DeviceId, SignalKind, Tick};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A signal waiting to be delivered to a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledSignal {
    /// When this signal is delivered.
    pub time: Tick,
    /// Alert or cancellation.
    pub kind: SignalKind,
    /// Device receiving the signal.
    pub target: DeviceId,
    /// Relaying device, or `None` for signals injected from outside.
    pub origin: Option<DeviceId>,
    /// What the signal is about.
    pub description: Description,
}

impl ScheduledSignal {
    /// Create a signal injected from outside the network.
    pub fn external(
        time: Tick,
        kind: SignalKind,
        target: DeviceId,
        description: Description,
    ) -> Self {
        Self {
            time,
            kind,
            target,
            origin: None,
            description,
        }
    }

    /// Create a signal relayed from `origin` to `target`.
    pub fn relay(
        time: Tick,
        kind: SignalKind,
        target: DeviceId,
        origin: DeviceId,
        description: Description,
    ) -> Self {
        Self {
            time,
            kind,
            target,
            origin: Some(origin),
            description,
        }
    }

    /// Whether this signal came from another device.
    pub fn is_relay(&self) -> bool {
        self.origin.is_some()
    }
}

/// Signals are ordered by:
/// 1. Time (earlier first)
/// 2. Kind (ALERT before CANCEL)
/// 3. Target device (ascending id)
/// 4. Origin (external first, then ascending id)
/// 5. Description (lexicographic)
impl Ord for ScheduledSignal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.time.cmp(&other.time) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match self.kind.rank().cmp(&other.kind.rank()) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match self.target.cmp(&other.target) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // `None < Some(_)`: injected signals precede relays.
        match self.origin.cmp(&other.origin) {
            Ordering::Equal => {}
            ord => return ord,
        }

        self.description.cmp(&other.description)
    }
}

impl PartialOrd for ScheduledSignal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-ordered multiset of pending signals.
///
/// Identical signals may be queued more than once; each is delivered.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<ScheduledSignal>>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a signal. O(log n).
    pub fn push(&mut self, signal: ScheduledSignal) {
        self.heap.push(Reverse(signal));
    }

    /// Delivery time of the next signal, if any. O(1).
    pub fn peek_min_time(&self) -> Option<Tick> {
        self.heap.peek().map(|Reverse(signal)| signal.time)
    }

    /// Remove and return the next signal.
    pub fn pop_min(&mut self) -> Result<ScheduledSignal, SimulationError> {
        self.heap
            .pop()
            .map(|Reverse(signal)| signal)
            .ok_or(SimulationError::EmptyQueue)
    }

    /// Remove and return the next signal if it is due at or before `now`.
    pub fn pop_due(&mut self, now: Tick) -> Option<ScheduledSignal> {
        match self.peek_min_time() {
            Some(time) if time <= now => self.heap.pop().map(|Reverse(signal)| signal),
            _ => None,
        }
    }

    /// Number of queued signals.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no signals are queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Extend<ScheduledSignal> for EventQueue {
    fn extend<I: IntoIterator<Item = ScheduledSignal>>(&mut self, iter: I) {
        self.heap.extend(iter.into_iter().map(Reverse));
    }
}
