//! Production line service: owns the fleet of machines, mirrors membership
//! into storage and drives start/stop and the monitoring tick.

use fabline_domain::device::Device;
use fabline_domain::error::{FablineError, NotFoundError};
use fabline_domain::id::DeviceId;
use fabline_domain::machine::IndustrialMachine;
use fabline_domain::snapshot::{LineDescription, LineMeasurement};
use fabline_domain::time::{Timestamp, now};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::DeviceStore;

/// Probability that a machine's switch is toggled on a given tick.
pub const TOGGLE_PROBABILITY: f64 = 0.5;

/// Static identity and location of a production line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineConfig {
    pub line_id: DeviceId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Outcome of a single monitoring tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Machine measurements appended during the tick.
    pub measurements: usize,
    /// Machines whose switch was toggled, in iteration order.
    pub toggled: Vec<DeviceId>,
}

/// Totals accumulated over a monitoring run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitoringSummary {
    pub ticks: u32,
    pub measurements: usize,
    pub toggles: usize,
}

impl MonitoringSummary {
    /// Fold one tick into the totals.
    pub fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.measurements += report.measurements;
        self.toggles += report.toggled.len();
    }
}

/// A production line: STOPPED initially, RUNNING after [`start`](Self::start).
///
/// The line is the sole owner of its machines and the only writer to the
/// store it was given.
pub struct ProductionLine<S, R = StdRng> {
    config: LineConfig,
    running: bool,
    updated_at: Timestamp,
    machines: Vec<IndustrialMachine>,
    store: S,
    rng: R,
}

impl<S: DeviceStore> ProductionLine<S> {
    /// Create a line whose randomness comes from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns a storage error if publishing the initial description fails.
    pub fn with_entropy(config: LineConfig, store: S) -> Result<Self, FablineError> {
        Self::new(config, store, StdRng::from_os_rng())
    }
}

impl<S: DeviceStore, R: Rng> ProductionLine<S, R> {
    /// Create a stopped line and publish its (empty) description.
    ///
    /// # Errors
    ///
    /// Returns a storage error if publishing the description fails.
    pub fn new(config: LineConfig, store: S, rng: R) -> Result<Self, FablineError> {
        let line = Self {
            config,
            running: false,
            updated_at: now(),
            machines: Vec::new(),
            store,
            rng,
        };
        line.publish_description()?;
        Ok(line)
    }

    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.config.line_id
    }

    #[must_use]
    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// The store this line publishes to.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Machines in insertion order.
    #[must_use]
    pub fn machines(&self) -> &[IndustrialMachine] {
        &self.machines
    }

    #[must_use]
    pub fn machine_ids(&self) -> Vec<DeviceId> {
        self.machines.iter().map(|m| m.id().clone()).collect()
    }

    #[must_use]
    pub fn machine(&self, id: &DeviceId) -> Option<&IndustrialMachine> {
        self.machines.iter().find(|m| m.id() == id)
    }

    /// Add a machine and publish both the updated line description and the
    /// machine's own description. A machine with the same id is replaced in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns a storage error if publishing fails.
    #[tracing::instrument(skip(self, machine), fields(machine_id = %machine.id()))]
    pub fn add_machine(&mut self, machine: IndustrialMachine) -> Result<(), FablineError> {
        let description = machine.describe();
        let machine_id = machine.id().clone();

        match self.machines.iter_mut().find(|m| m.id() == &machine_id) {
            Some(slot) => *slot = machine,
            None => self.machines.push(machine),
        }

        self.publish_description()?;
        self.store.put_description(&machine_id, description.into())?;
        tracing::info!(line_id = %self.config.line_id, "machine added");
        Ok(())
    }

    /// Add a generic device, which must be an [`IndustrialMachine`].
    ///
    /// # Errors
    ///
    /// Returns [`FablineError::TypeMismatch`] for any other device kind, or a
    /// storage error if publishing fails.
    pub fn add_device(&mut self, device: Device) -> Result<(), FablineError> {
        let machine = IndustrialMachine::try_from(device)?;
        self.add_machine(machine)
    }

    /// Remove a machine, republish the line description and drop the
    /// machine's description from storage. Measurement history is kept.
    ///
    /// # Errors
    ///
    /// Returns [`FablineError::NotFound`] when `id` is not on this line (the
    /// line is left unchanged), or a storage error if publishing fails.
    #[tracing::instrument(skip(self))]
    pub fn remove_machine(&mut self, id: &DeviceId) -> Result<IndustrialMachine, FablineError> {
        let index = self
            .machines
            .iter()
            .position(|m| m.id() == id)
            .ok_or_else(|| NotFoundError {
                entity: "Machine",
                id: id.to_string(),
            })?;

        let machine = self.machines.remove(index);
        self.publish_description()?;
        self.store.remove_description(id)?;
        tracing::info!(line_id = %self.config.line_id, "machine removed");
        Ok(machine)
    }

    /// Start every machine in insertion order, then mark the line running
    /// and append a line measurement.
    ///
    /// # Errors
    ///
    /// The first machine failure aborts the call; machines already started
    /// stay started and the line status is not changed.
    pub fn start(&mut self) -> Result<(), FablineError> {
        tracing::info!(
            line_id = %self.config.line_id,
            machines = self.machines.len(),
            "starting production line"
        );
        for machine in &mut self.machines {
            tracing::debug!(machine_id = %machine.id(), "starting machine");
            machine.start(&mut self.rng)?;
        }
        self.set_running(true)
    }

    /// Stop every machine in insertion order, then mark the line stopped
    /// and append a line measurement.
    ///
    /// # Errors
    ///
    /// The first machine failure aborts the call.
    pub fn stop(&mut self) -> Result<(), FablineError> {
        tracing::info!(
            line_id = %self.config.line_id,
            machines = self.machines.len(),
            "stopping production line"
        );
        for machine in &mut self.machines {
            tracing::debug!(machine_id = %machine.id(), "stopping machine");
            machine.stop(&mut self.rng)?;
        }
        self.set_running(false)
    }

    /// Run one monitoring step.
    ///
    /// For every machine: update all sensors and append a machine sample;
    /// then, with probability [`TOGGLE_PROBABILITY`], flip the switch and
    /// append a second sample. Membership and line status are untouched.
    ///
    /// # Errors
    ///
    /// Storage or actuator failures abort the tick.
    pub fn tick(&mut self) -> Result<TickReport, FablineError> {
        let mut report = TickReport::default();

        for machine in &mut self.machines {
            machine.update_all_measurements(&mut self.rng);
            self.store
                .append_measurement(machine.id(), machine.sample().into())?;
            report.measurements += 1;

            if self.rng.random_bool(TOGGLE_PROBABILITY) {
                let from = machine.switch().status();
                let to = machine.switch_mut().toggle()?;
                tracing::debug!(machine_id = %machine.id(), %from, %to, "switch toggled");
                self.store
                    .append_measurement(machine.id(), machine.sample().into())?;
                report.measurements += 1;
                report.toggled.push(machine.id().clone());
            }
        }

        tracing::debug!(
            line_id = %self.config.line_id,
            measurements = report.measurements,
            toggles = report.toggled.len(),
            "tick completed"
        );
        Ok(report)
    }

    /// Run `ticks` monitoring steps back to back, without any delay.
    ///
    /// # Errors
    ///
    /// The first failing tick aborts the run.
    pub fn monitor(&mut self, ticks: u32) -> Result<MonitoringSummary, FablineError> {
        let mut summary = MonitoringSummary::default();
        for _ in 0..ticks {
            let report = self.tick()?;
            summary.record(&report);
        }
        Ok(summary)
    }

    /// Line identity with member machine ids only.
    #[must_use]
    pub fn describe(&self) -> LineDescription {
        LineDescription {
            line_id: self.config.line_id.clone(),
            name: self.config.name.clone(),
            latitude: self.config.latitude,
            longitude: self.config.longitude,
            machine_list: self.machine_ids(),
        }
    }

    #[must_use]
    pub fn sample(&self) -> LineMeasurement {
        LineMeasurement {
            line_id: self.config.line_id.clone(),
            line_status: self.running,
            line_update_timestamp: self.updated_at,
        }
    }

    fn set_running(&mut self, running: bool) -> Result<(), FablineError> {
        self.running = running;
        self.updated_at = now();
        self.store
            .append_measurement(&self.config.line_id, self.sample().into())
    }

    fn publish_description(&self) -> Result<(), FablineError> {
        self.store
            .put_description(&self.config.line_id, self.describe().into())
    }
}
