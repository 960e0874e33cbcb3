//! Domain-specific identifier types.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// One unit of the integer simulation clock.
pub type Tick = u64;

/// Device identifier.
///
/// Declared ids are positive; zero never names a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u64);

impl DeviceId {
    /// Get the raw value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Whether this id is usable as a declared device (positive).
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for DeviceId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(DeviceId)
    }
}

impl From<u64> for DeviceId {
    fn from(id: u64) -> Self {
        DeviceId(id)
    }
}
