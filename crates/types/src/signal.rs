//! Signal kinds and descriptions.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// The kind of a signal travelling through the network.
///
/// The declaration order is the dequeue rank: at equal delivery time every
/// `Alert` is processed before any `Cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalKind {
    /// Raise an alert for a description.
    Alert = 0,
    /// Cancel a previously raised alert.
    Cancel = 1,
}

impl SignalKind {
    /// Tie-break rank among signals due at the same tick (lower first).
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Wording used in transcript lines.
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::Alert => "ALERT",
            SignalKind::Cancel => "CANCELLATION",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Free-text description identifying what an alert is about.
///
/// Cheap to clone; every relayed copy of a signal shares the same allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Description(Arc<str>);

impl Description {
    /// Create a description from text.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(Arc::from(text.as_ref()))
    }

    /// Get the description text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Description {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Description {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
