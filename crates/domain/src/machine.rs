//! Industrial machine: a composite device owning one switch, one energy
//! sensor and a fixed set of accelerometers.
//!
//! Sub-device ids are derived from the machine id at construction:
//!
//! | Role | Id |
//! |------|----|
//! | Switch | `{machine_id}_switch` |
//! | Energy sensor | `{machine_id}_energy_sensor` |
//! | Accelerometer `i` | `{machine_id}_accelerometer_{i}` |
//!
//! Sub-devices are owned exclusively and never exposed mutably except for
//! the switch, whose status can only move through a validated action.

use rand::Rng;

use crate::actuator::Switch;
use crate::device::{DeviceInfo, MANUFACTURER};
use crate::error::InvalidActionError;
use crate::id::DeviceId;
use crate::sensor::{AccelerometerSensor, EnergySensor, Sensor};
use crate::snapshot::{MachineDescription, MachineMeasurement};

/// A composite machine with start/stop semantics.
#[derive(Debug, Clone)]
pub struct IndustrialMachine {
    info: DeviceInfo,
    switch: Switch,
    energy_sensor: EnergySensor,
    accelerometers: Vec<AccelerometerSensor>,
}

impl IndustrialMachine {
    pub const DEVICE_TYPE: &'static str = "iot.industrial.machine";
    /// Accelerometers fitted by [`with_defaults`](Self::with_defaults).
    pub const DEFAULT_ACCELEROMETERS: usize = 3;

    /// Build a machine with `accelerometer_count` accelerometers.
    #[must_use]
    pub fn new(machine_id: DeviceId, accelerometer_count: usize) -> Self {
        let switch = Switch::new(DeviceId::derived(&machine_id, "switch", None));
        let energy_sensor =
            EnergySensor::new(DeviceId::derived(&machine_id, "energy_sensor", None));
        let accelerometers = (0..accelerometer_count)
            .map(|index| {
                let id = DeviceId::derived(&machine_id, "accelerometer", Some(index));
                AccelerometerSensor::new(id)
            })
            .collect();

        Self {
            info: DeviceInfo::new(machine_id, Self::DEVICE_TYPE, MANUFACTURER),
            switch,
            energy_sensor,
            accelerometers,
        }
    }

    #[must_use]
    pub fn with_defaults(machine_id: DeviceId) -> Self {
        Self::new(machine_id, Self::DEFAULT_ACCELEROMETERS)
    }

    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    #[must_use]
    pub fn id(&self) -> &DeviceId {
        self.info.device_id()
    }

    #[must_use]
    pub fn switch(&self) -> &Switch {
        &self.switch
    }

    /// Mutable access to the switch. Status still only changes through
    /// [`Switch::invoke_action`].
    pub fn switch_mut(&mut self) -> &mut Switch {
        &mut self.switch
    }

    #[must_use]
    pub fn energy_sensor(&self) -> &EnergySensor {
        &self.energy_sensor
    }

    #[must_use]
    pub fn accelerometers(&self) -> &[AccelerometerSensor] {
        &self.accelerometers
    }

    /// Number of owned sensors (energy plus accelerometers).
    #[must_use]
    pub fn sensor_count(&self) -> usize {
        self.accelerometers.len() + 1
    }

    /// Update every owned sensor exactly once. The switch is untouched.
    pub fn update_all_measurements<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.energy_sensor.update_measurement(rng);
        for sensor in &mut self.accelerometers {
            sensor.update_measurement(rng);
        }
    }

    /// Switch on, then take a fresh sensor snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidActionError`] if the switch rejects the action; the
    /// sensors are not updated in that case.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), InvalidActionError> {
        self.switch
            .invoke_action(Switch::ACTION_TYPE_SWITCH, Switch::STATUS_ON)?;
        self.update_all_measurements(rng);
        Ok(())
    }

    /// Take a final sensor snapshot, then switch off.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidActionError`] if the switch rejects the action; the
    /// sensors have already been updated in that case.
    pub fn stop<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), InvalidActionError> {
        self.update_all_measurements(rng);
        self.switch
            .invoke_action(Switch::ACTION_TYPE_SWITCH, Switch::STATUS_OFF)
    }

    /// Machine identity with every sub-device description nested in full.
    #[must_use]
    pub fn describe(&self) -> MachineDescription {
        MachineDescription {
            machine_id: self.info.device_id().clone(),
            machine_type: self.info.device_type().to_string(),
            machine_manufacturer: self.info.manufacturer().to_string(),
            switch_id: self.switch.describe(),
            energy_sensor_id: self.energy_sensor.describe(),
            accelerometer_sensor_id_list: self
                .accelerometers
                .iter()
                .map(Sensor::describe)
                .collect(),
        }
    }

    /// Consolidated sample of the switch and every sensor.
    #[must_use]
    pub fn sample(&self) -> MachineMeasurement {
        MachineMeasurement {
            machine_id: self.info.device_id().clone(),
            switch: self.switch.sample(),
            energy_sensor: self.energy_sensor.sample(),
            accelerometer_sensor_list: self.accelerometers.iter().map(Sensor::sample).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::SwitchStatus;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn machine() -> IndustrialMachine {
        IndustrialMachine::with_defaults(DeviceId::new("industrial_machine_1"))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    #[test]
    fn should_derive_sub_device_ids_from_machine_id() {
        let m = machine();
        assert_eq!(m.switch().info().device_id().as_str(), "industrial_machine_1_switch");
        assert_eq!(
            m.energy_sensor().info().device_id().as_str(),
            "industrial_machine_1_energy_sensor"
        );
        let ids: Vec<&str> = m
            .accelerometers()
            .iter()
            .map(|a| a.info().device_id().as_str())
            .collect();
        assert_eq!(
            ids,
            [
                "industrial_machine_1_accelerometer_0",
                "industrial_machine_1_accelerometer_1",
                "industrial_machine_1_accelerometer_2",
            ]
        );
    }

    #[test]
    fn should_build_identical_structure_for_same_id() {
        let a = machine().describe();
        let b = machine().describe();
        assert_eq!(a, b);
    }

    #[test]
    fn should_describe_every_sensor_plus_switch() {
        for count in [0, 1, 3, 5] {
            let m = IndustrialMachine::new(DeviceId::new("m"), count);
            let desc = m.describe();
            assert_eq!(desc.sub_device_count(), m.sensor_count() + 1);
            assert_eq!(desc.accelerometer_sensor_id_list.len(), count);
        }
    }

    #[test]
    fn should_nest_full_descriptions_not_ids() {
        let json = serde_json::to_value(machine().describe()).unwrap();
        assert_eq!(json["machine_type"], "iot.industrial.machine");
        assert_eq!(json["switch_id"]["device_type"], "iot.actuator.switch");
        assert_eq!(json["energy_sensor_id"]["device_type"], "iot.sensor.energy");
        assert_eq!(
            json["accelerometer_sensor_id_list"][0]["device_id"],
            "industrial_machine_1_accelerometer_0"
        );
    }

    #[test]
    fn should_nest_samples_as_objects() {
        let json = serde_json::to_value(machine().sample()).unwrap();
        assert!(json["switch"].is_object());
        assert!(json["energy_sensor"].is_object());
        assert_eq!(json["accelerometer_sensor_list"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn should_update_every_sensor_and_leave_switch_alone() {
        let mut m = machine();
        let switch_before = m.switch().sample();
        m.update_all_measurements(&mut rng());

        assert!(m.energy_sensor().timestamp().is_some());
        assert!(m.accelerometers().iter().all(|a| a.timestamp().is_some()));
        assert_eq!(m.switch().sample(), switch_before);
    }

    #[test]
    fn should_switch_on_when_started() {
        let mut m = machine();
        m.start(&mut rng()).unwrap();
        assert_eq!(m.switch().status(), SwitchStatus::On);
        assert!(m.energy_sensor().timestamp().is_some());
    }

    #[test]
    fn should_switch_on_before_sampling_sensors_on_start() {
        let mut m = machine();
        m.start(&mut rng()).unwrap();
        let switched = m.switch().timestamp().unwrap();
        assert!(m.energy_sensor().timestamp().unwrap() >= switched);
    }

    #[test]
    fn should_sample_sensors_before_switching_off_on_stop() {
        let mut m = machine();
        m.stop(&mut rng()).unwrap();
        assert_eq!(m.switch().status(), SwitchStatus::Off);
        let switched = m.switch().timestamp().unwrap();
        assert!(m.energy_sensor().timestamp().unwrap() <= switched);
    }

    #[test]
    fn should_end_off_after_stop_regardless_of_prior_state() {
        let mut m = machine();
        m.start(&mut rng()).unwrap();
        m.stop(&mut rng()).unwrap();
        assert_eq!(m.switch().status(), SwitchStatus::Off);
        m.stop(&mut rng()).unwrap();
        assert_eq!(m.switch().status(), SwitchStatus::Off);
    }
}
