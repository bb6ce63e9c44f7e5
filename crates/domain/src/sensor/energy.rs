//! Energy sensor: a kWh counter moved by a symmetric random walk.

use rand::Rng;

use crate::device::{DeviceInfo, MANUFACTURER};
use crate::id::DeviceId;
use crate::sensor::Sensor;
use crate::snapshot::SensorValue;
use crate::time::{Timestamp, advance};

/// A simulated energy meter.
///
/// Each update moves the counter up or down (fair coin) by
/// `2 * (u + 0.5)` with `u` uniform in `[0, 1)`, so a single step lies in
/// `[1.0, 3.0)`. The counter is not clamped and may go negative.
#[derive(Debug, Clone)]
pub struct EnergySensor {
    info: DeviceInfo,
    kwh: f64,
    timestamp: Option<Timestamp>,
}

impl EnergySensor {
    pub const DEVICE_TYPE: &'static str = "iot.sensor.energy";
    pub const UNIT: &'static str = "kWh";
    /// Smallest possible step magnitude.
    pub const MIN_STEP: f64 = 1.0;
    /// Largest possible step magnitude (exclusive).
    pub const MAX_STEP: f64 = 3.0;

    #[must_use]
    pub fn new(device_id: DeviceId) -> Self {
        Self::with_initial(device_id, 0.0)
    }

    /// Start the counter at `initial_kwh`.
    #[must_use]
    pub fn with_initial(device_id: DeviceId, initial_kwh: f64) -> Self {
        Self {
            info: DeviceInfo::new(device_id, Self::DEVICE_TYPE, MANUFACTURER),
            kwh: initial_kwh,
            timestamp: None,
        }
    }
}

impl Sensor for EnergySensor {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn unit(&self) -> &'static str {
        Self::UNIT
    }

    fn value(&self) -> Option<SensorValue> {
        self.timestamp.map(|_| SensorValue::Scalar(self.kwh))
    }

    fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    fn update_measurement<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let increment = rng.random_bool(0.5);
        let step = 2.0 * (rng.random::<f64>() + 0.5);
        if increment {
            self.kwh += step;
        } else {
            self.kwh -= step;
        }
        self.timestamp = Some(advance(self.timestamp));
    }
}
