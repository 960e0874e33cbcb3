//! Per-device alert and suppression state.
//!
//! Each (device, description) pair moves through
//! `Unseen -> Active -> Suppressed`; `Suppressed` is terminal.

use crate::{RelayPolicy, SimulationError};
use alertsim_types::{Description, DeviceId};
use std::collections::{BTreeMap, BTreeSet};

/// Where a description stands on one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    /// Never alerted on this device.
    Unseen,
    /// Currently alerting.
    Active,
    /// Cancelled; can never become active again.
    Suppressed,
}

/// Alert state of a single device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceState {
    active: BTreeSet<Description>,
    suppressed: BTreeSet<Description>,
}

impl DeviceState {
    /// Where `description` stands on this device.
    pub fn state_of(&self, description: &str) -> SignalState {
        if self.suppressed.contains(description) {
            SignalState::Suppressed
        } else if self.active.contains(description) {
            SignalState::Active
        } else {
            SignalState::Unseen
        }
    }

    /// Descriptions currently alerting.
    pub fn active(&self) -> impl Iterator<Item = &Description> {
        self.active.iter()
    }

    /// Descriptions permanently cancelled.
    pub fn suppressed(&self) -> impl Iterator<Item = &Description> {
        self.suppressed.iter()
    }

    fn activate(&mut self, description: &Description, policy: RelayPolicy) -> bool {
        if self.suppressed.contains(description) {
            return false;
        }
        let newly_active = self.active.insert(description.clone());
        match policy {
            RelayPolicy::RelayOnce => newly_active,
            RelayPolicy::RelayEveryAlert => true,
        }
    }

    fn cancel(&mut self, description: &Description) -> bool {
        if !self.active.remove(description) {
            return false;
        }
        self.suppressed.insert(description.clone());
        true
    }
}

/// State of every declared device.
#[derive(Debug, Clone)]
pub struct DeviceStates {
    devices: BTreeMap<DeviceId, DeviceState>,
    policy: RelayPolicy,
}

impl DeviceStates {
    /// Create empty state for each declared device.
    pub fn new(devices: impl IntoIterator<Item = DeviceId>, policy: RelayPolicy) -> Self {
        Self {
            devices: devices
                .into_iter()
                .map(|d| (d, DeviceState::default()))
                .collect(),
            policy,
        }
    }

    /// Get a device's state.
    pub fn lookup(&self, device: DeviceId) -> Result<&DeviceState, SimulationError> {
        self.devices
            .get(&device)
            .ok_or(SimulationError::UnknownDevice(device))
    }

    fn lookup_mut(&mut self, device: DeviceId) -> Result<&mut DeviceState, SimulationError> {
        self.devices
            .get_mut(&device)
            .ok_or(SimulationError::UnknownDevice(device))
    }

    /// Whether the device was declared.
    pub fn contains(&self, device: DeviceId) -> bool {
        self.devices.contains_key(&device)
    }

    /// Activate `description` on `device`.
    ///
    /// Returns whether the alert should be relayed. Always `false` once the
    /// description is suppressed on this device.
    pub fn try_activate(
        &mut self,
        device: DeviceId,
        description: &Description,
    ) -> Result<bool, SimulationError> {
        let policy = self.policy;
        Ok(self.lookup_mut(device)?.activate(description, policy))
    }

    /// Cancel `description` on `device`, suppressing it permanently.
    ///
    /// Returns whether the cancellation should be relayed; `false` when the
    /// description was not active (never alerted or already cancelled).
    pub fn try_cancel(
        &mut self,
        device: DeviceId,
        description: &Description,
    ) -> Result<bool, SimulationError> {
        Ok(self.lookup_mut(device)?.cancel(description))
    }

    /// Where `description` stands on `device`.
    pub fn state_of(
        &self,
        device: DeviceId,
        description: &str,
    ) -> Result<SignalState, SimulationError> {
        Ok(self.lookup(device)?.state_of(description))
    }

    /// Iterate over devices in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (DeviceId, &DeviceState)> {
        self.devices.iter().map(|(id, state)| (*id, state))
    }

    /// Number of devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether there are no devices.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
