//! Ordered log of everything a run did.

use alertsim_types::{Description, DeviceId, SignalKind, Tick};
use std::fmt;

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A device received a relayed signal.
    Received {
        tick: Tick,
        device: DeviceId,
        kind: SignalKind,
        origin: DeviceId,
        description: Description,
    },
    /// A device relayed a signal to a neighbor.
    Sent {
        tick: Tick,
        device: DeviceId,
        kind: SignalKind,
        neighbor: DeviceId,
        description: Description,
    },
    /// The run reached its horizon.
    End { tick: Tick },
}

impl LogEntry {
    /// Tick the line is stamped with.
    pub fn tick(&self) -> Tick {
        match self {
            LogEntry::Received { tick, .. } | LogEntry::Sent { tick, .. } | LogEntry::End { tick } => {
                *tick
            }
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Received {
                tick,
                device,
                kind,
                origin,
                description,
            } => write!(f, "@{tick}: {device} RECEIVED {kind} FROM {origin}: {description}"),
            LogEntry::Sent {
                tick,
                device,
                kind,
                neighbor,
                description,
            } => write!(f, "@{tick}: {device} SENT {kind} TO {neighbor}: {description}"),
            LogEntry::End { tick } => write!(f, "@{tick}: END"),
        }
    }
}

/// Transcript lines in the order they were produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<LogEntry>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// All lines.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Iterate over lines.
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no lines were produced.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendered lines, without line terminators.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

/// Renders every line followed by `\n`.
impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
