//! Topology trait and static implementation.

use crate::{DeviceId, Tick};
use indexmap::{IndexMap, IndexSet};

/// A directed, delayed propagation link between two devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    /// Device relaying the signal.
    pub source: DeviceId,
    /// Device receiving the relayed signal.
    pub destination: DeviceId,
    /// Ticks between sending and delivery.
    pub delay: Tick,
}

impl Link {
    /// Create a new link.
    pub fn new(source: DeviceId, destination: DeviceId, delay: Tick) -> Self {
        Self {
            source,
            destination,
            delay,
        }
    }
}

/// Read-only view of the device network.
pub trait Topology {
    /// Whether the device was declared.
    fn contains(&self, device: DeviceId) -> bool;

    /// Declared devices, in declaration order.
    fn devices(&self) -> &[DeviceId];

    /// Outgoing links of a device, in declaration order.
    ///
    /// Empty for devices without outgoing links (including undeclared ones).
    fn neighbors(&self, device: DeviceId) -> &[Link];

    // Derived methods

    /// Number of declared devices.
    fn device_count(&self) -> usize {
        self.devices().len()
    }

    /// Number of outgoing links of a device.
    fn out_degree(&self, device: DeviceId) -> usize {
        self.neighbors(device).len()
    }

    /// Total number of links in the network.
    fn link_count(&self) -> usize {
        self.devices().iter().map(|d| self.out_degree(*d)).sum()
    }

    /// Check that a device was declared.
    fn lookup(&self, device: DeviceId) -> Result<DeviceId, TopologyError> {
        if self.contains(device) {
            Ok(device)
        } else {
            Err(TopologyError::UnknownDevice(device))
        }
    }
}

/// Errors that can occur when building topology information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// A link references a device that was never declared.
    #[error("device {0} was never declared")]
    UnknownDevice(DeviceId),

    /// The same device was declared more than once.
    #[error("device {0} is declared more than once")]
    DuplicateDevice(DeviceId),

    /// Device ids must be positive.
    #[error("device id {0} is not positive")]
    InvalidDevice(DeviceId),
}

/// A topology fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticTopology {
    devices: IndexSet<DeviceId>,
    order: Vec<DeviceId>,
    links: IndexMap<DeviceId, Vec<Link>>,
}

impl StaticTopology {
    /// Build a topology from declared devices and links.
    ///
    /// Every link endpoint must be a declared device. Links sharing a source
    /// keep their relative order.
    pub fn new(
        devices: impl IntoIterator<Item = DeviceId>,
        links: impl IntoIterator<Item = Link>,
    ) -> Result<Self, TopologyError> {
        let mut declared = IndexSet::new();
        for device in devices {
            if !device.is_valid() {
                return Err(TopologyError::InvalidDevice(device));
            }
            if !declared.insert(device) {
                return Err(TopologyError::DuplicateDevice(device));
            }
        }

        let mut by_source: IndexMap<DeviceId, Vec<Link>> = IndexMap::new();
        for link in links {
            for endpoint in [link.source, link.destination] {
                if !declared.contains(&endpoint) {
                    return Err(TopologyError::UnknownDevice(endpoint));
                }
            }
            by_source.entry(link.source).or_default().push(link);
        }

        Ok(Self {
            order: declared.iter().copied().collect(),
            devices: declared,
            links: by_source,
        })
    }
}

impl Topology for StaticTopology {
    fn contains(&self, device: DeviceId) -> bool {
        self.devices.contains(&device)
    }

    fn devices(&self) -> &[DeviceId] {
        &self.order
    }

    fn neighbors(&self, device: DeviceId) -> &[Link] {
        self.links
            .get(&device)
            .map(|links| links.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<DeviceId> {
        raw.iter().copied().map(DeviceId).collect()
    }

    fn link(source: u64, destination: u64, delay: Tick) -> Link {
        Link::new(DeviceId(source), DeviceId(destination), delay)
    }

    #[test]
    fn test_neighbors_keep_declaration_order() {
        let topology = StaticTopology::new(
            ids(&[1, 2, 3, 4]),
            vec![link(1, 4, 10), link(2, 3, 5), link(1, 2, 0), link(1, 3, 7)],
        )
        .unwrap();

        let destinations: Vec<_> = topology
            .neighbors(DeviceId(1))
            .iter()
            .map(|l| l.destination)
            .collect();
        assert_eq!(destinations, ids(&[4, 2, 3]));
        assert_eq!(topology.out_degree(DeviceId(2)), 1);
        assert_eq!(topology.link_count(), 4);
    }

    #[test]
    fn test_device_without_links_has_no_neighbors() {
        let topology = StaticTopology::new(ids(&[1, 2]), vec![link(1, 2, 3)]).unwrap();
        assert!(topology.neighbors(DeviceId(2)).is_empty());
        assert!(topology.neighbors(DeviceId(99)).is_empty());
    }

    #[test]
    fn test_devices_in_declaration_order() {
        let topology = StaticTopology::new(ids(&[3, 1, 2]), vec![]).unwrap();
        assert_eq!(topology.devices(), ids(&[3, 1, 2]).as_slice());
        assert_eq!(topology.device_count(), 3);

        let devices: &[DeviceId] = topology.devices();
        assert_eq!(devices.first(), Some(&DeviceId(3)));
        assert!(devices.iter().all(|d| topology.contains(*d)));
    }

    #[test]
    fn test_undeclared_endpoint_rejected() {
        let err = StaticTopology::new(ids(&[1]), vec![link(1, 2, 3)]).unwrap_err();
        assert_eq!(err, TopologyError::UnknownDevice(DeviceId(2)));

        let err = StaticTopology::new(ids(&[2]), vec![link(1, 2, 3)]).unwrap_err();
        assert_eq!(err, TopologyError::UnknownDevice(DeviceId(1)));
    }

    #[test]
    fn test_duplicate_and_invalid_devices_rejected() {
        let err = StaticTopology::new(ids(&[1, 1]), vec![]).unwrap_err();
        assert_eq!(err, TopologyError::DuplicateDevice(DeviceId(1)));

        let err = StaticTopology::new(ids(&[0]), vec![]).unwrap_err();
        assert_eq!(err, TopologyError::InvalidDevice(DeviceId(0)));
    }

    #[test]
    fn test_lookup() {
        let topology = StaticTopology::new(ids(&[1]), vec![]).unwrap();
        assert_eq!(topology.lookup(DeviceId(1)), Ok(DeviceId(1)));
        assert_eq!(
            topology.lookup(DeviceId(5)),
            Err(TopologyError::UnknownDevice(DeviceId(5)))
        );
    }
}
