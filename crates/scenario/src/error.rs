//! Error types for scenario loading.

use alertsim_types::DeviceId;
use thiserror::Error;

/// Errors while reading or validating a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A line could not be parsed into a recognized record.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A link or signal references a device that was never declared.
    #[error("line {line}: device {device} was never declared")]
    UnknownDevice {
        /// 1-based line number of the referencing record.
        line: usize,
        /// The undeclared device.
        device: DeviceId,
    },

    /// A device was declared twice.
    #[error("line {line}: device {device} is declared more than once")]
    DuplicateDevice {
        /// 1-based line number of the second declaration.
        line: usize,
        /// The repeated device.
        device: DeviceId,
    },

    /// No LENGTH record was given.
    #[error("missing LENGTH record")]
    MissingLength,

    /// More than one LENGTH record was given.
    #[error("line {line}: LENGTH given more than once")]
    DuplicateLength {
        /// 1-based line number of the second LENGTH record.
        line: usize,
    },

    /// Reading the input failed.
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
}

impl ScenarioError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ScenarioError::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
