//! Temperature sensor: uniform reading in a fixed Celsius band.

use rand::Rng;

use crate::device::{DeviceInfo, MANUFACTURER};
use crate::id::DeviceId;
use crate::sensor::Sensor;
use crate::snapshot::SensorValue;
use crate::time::{Timestamp, advance};

/// A simulated temperature probe.
#[derive(Debug, Clone)]
pub struct TemperatureSensor {
    info: DeviceInfo,
    value: Option<f64>,
    timestamp: Option<Timestamp>,
}

impl TemperatureSensor {
    pub const DEVICE_TYPE: &'static str = "iot.sensor.temperature";
    pub const UNIT: &'static str = "Celsius";
    /// Lower bound (inclusive) of generated readings.
    pub const MIN: f64 = 15.0;
    /// Upper bound (exclusive) of generated readings.
    pub const MAX: f64 = 35.0;

    #[must_use]
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            info: DeviceInfo::new(device_id, Self::DEVICE_TYPE, MANUFACTURER),
            value: None,
            timestamp: None,
        }
    }
}

impl Sensor for TemperatureSensor {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn unit(&self) -> &'static str {
        Self::UNIT
    }

    fn value(&self) -> Option<SensorValue> {
        self.value.map(SensorValue::Scalar)
    }

    fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    fn update_measurement<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.value = Some(rng.random_range(Self::MIN..Self::MAX));
        self.timestamp = Some(advance(self.timestamp));
    }
}
