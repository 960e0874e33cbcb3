//! Line-oriented scenario parser.

use crate::ScenarioError;
use alertsim_types::{Description, DeviceId, Link, SignalKind, StaticTopology, Tick};
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// A signal injected from outside the network before the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialSignal {
    /// Device the signal is delivered to.
    pub device: DeviceId,
    /// What the signal is about.
    pub description: Description,
    /// Delivery tick.
    pub time: Tick,
    /// Alert or cancellation.
    pub kind: SignalKind,
}

/// Complete input of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    /// Tick at which the run terminates.
    pub horizon: Tick,
    /// Declared devices, in declaration order.
    pub devices: Vec<DeviceId>,
    /// Propagation links, in declaration order.
    pub links: Vec<Link>,
    /// Externally injected signals, in declaration order.
    pub signals: Vec<InitialSignal>,
}

impl Scenario {
    /// Create an empty scenario with the given horizon.
    pub fn new(horizon: Tick) -> Self {
        Self {
            horizon,
            ..Default::default()
        }
    }

    /// Declare a device.
    pub fn with_device(mut self, device: u64) -> Self {
        self.devices.push(DeviceId(device));
        self
    }

    /// Declare a propagation link.
    pub fn with_link(mut self, source: u64, destination: u64, delay: Tick) -> Self {
        self.links
            .push(Link::new(DeviceId(source), DeviceId(destination), delay));
        self
    }

    /// Inject an alert at `time`.
    pub fn with_alert(self, device: u64, description: &str, time: Tick) -> Self {
        self.with_signal(device, description, time, SignalKind::Alert)
    }

    /// Inject a cancellation at `time`.
    pub fn with_cancel(self, device: u64, description: &str, time: Tick) -> Self {
        self.with_signal(device, description, time, SignalKind::Cancel)
    }

    fn with_signal(
        mut self,
        device: u64,
        description: &str,
        time: Tick,
        kind: SignalKind,
    ) -> Self {
        self.signals.push(InitialSignal {
            device: DeviceId(device),
            description: Description::new(description),
            time,
            kind,
        });
        self
    }

    /// Build the static topology described by this scenario.
    pub fn topology(&self) -> Result<StaticTopology, alertsim_types::TopologyError> {
        StaticTopology::new(self.devices.iter().copied(), self.links.iter().copied())
    }

    /// Parse scenario text.
    pub fn parse(input: &str) -> Result<Self, ScenarioError> {
        let mut scenario = Scenario::default();
        let mut horizon_line: Option<usize> = None;
        let mut declared: HashSet<DeviceId> = HashSet::new();
        // (line, device) for every cross-reference, checked after all declarations are seen.
        let mut references: Vec<(usize, DeviceId)> = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = text.split_whitespace().collect();
            match fields[0] {
                "LENGTH" => {
                    expect_arity(&fields, 2, line)?;
                    if horizon_line.is_some() {
                        return Err(ScenarioError::DuplicateLength { line });
                    }
                    scenario.horizon = number(&fields, 1, "length", line)?;
                    horizon_line = Some(line);
                }
                "DEVICE" => {
                    expect_arity(&fields, 2, line)?;
                    let device = device(&fields, 1, line)?;
                    if !declared.insert(device) {
                        return Err(ScenarioError::DuplicateDevice { line, device });
                    }
                    scenario.devices.push(device);
                }
                "PROPAGATE" => {
                    expect_arity(&fields, 4, line)?;
                    let source = device(&fields, 1, line)?;
                    let destination = device(&fields, 2, line)?;
                    let delay = number(&fields, 3, "delay", line)?;
                    references.push((line, source));
                    references.push((line, destination));
                    scenario.links.push(Link::new(source, destination, delay));
                }
                keyword @ ("ALERT" | "CANCEL") => {
                    expect_arity(&fields, 4, line)?;
                    let device = device(&fields, 1, line)?;
                    let time = number(&fields, 3, "time", line)?;
                    let kind = if keyword == "ALERT" {
                        SignalKind::Alert
                    } else {
                        SignalKind::Cancel
                    };
                    references.push((line, device));
                    scenario.signals.push(InitialSignal {
                        device,
                        description: Description::new(fields[2]),
                        time,
                        kind,
                    });
                }
                other => {
                    return Err(ScenarioError::malformed(
                        line,
                        format!("unknown record type '{}'", other),
                    ));
                }
            }
        }

        if horizon_line.is_none() {
            return Err(ScenarioError::MissingLength);
        }

        if let Some(&(line, device)) = references.iter().find(|(_, d)| !declared.contains(d)) {
            return Err(ScenarioError::UnknownDevice { line, device });
        }

        debug!(
            horizon = scenario.horizon,
            devices = scenario.devices.len(),
            links = scenario.links.len(),
            signals = scenario.signals.len(),
            "Parsed scenario"
        );

        Ok(scenario)
    }

    /// Read and parse a scenario from any reader.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, ScenarioError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input)
    }

    /// Read and parse a scenario file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let input = fs::read_to_string(path)?;
        Self::parse(&input)
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn expect_arity(fields: &[&str], expected: usize, line: usize) -> Result<(), ScenarioError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(ScenarioError::malformed(
            line,
            format!(
                "{} expects {} fields, found {}",
                fields[0],
                expected - 1,
                fields.len() - 1
            ),
        ))
    }
}

fn number(fields: &[&str], index: usize, name: &str, line: usize) -> Result<u64, ScenarioError> {
    fields[index].parse().map_err(|_| {
        ScenarioError::malformed(
            line,
            format!(
                "expected non-negative integer for {}, found '{}'",
                name, fields[index]
            ),
        )
    })
}

fn device(fields: &[&str], index: usize, line: usize) -> Result<DeviceId, ScenarioError> {
    let device = DeviceId(number(fields, index, "device id", line)?);
    if !device.is_valid() {
        return Err(ScenarioError::malformed(line, "device id must be positive"));
    }
    Ok(device)
}
