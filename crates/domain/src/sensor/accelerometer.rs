//! Accelerometer: three independent integer axes.

use rand::Rng;

use crate::device::{DeviceInfo, MANUFACTURER};
use crate::id::DeviceId;
use crate::sensor::Sensor;
use crate::snapshot::{Axes, SensorValue};
use crate::time::{Timestamp, advance};

/// A simulated three-axis accelerometer.
#[derive(Debug, Clone)]
pub struct AccelerometerSensor {
    info: DeviceInfo,
    value: Option<Axes>,
    timestamp: Option<Timestamp>,
}

impl AccelerometerSensor {
    pub const DEVICE_TYPE: &'static str = "iot.sensor.accelerometer";
    pub const UNIT: &'static str = "Acceleration";
    /// Inclusive bound applied to each axis, in both directions.
    pub const AXIS_LIMIT: i32 = 400;

    #[must_use]
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            info: DeviceInfo::new(device_id, Self::DEVICE_TYPE, MANUFACTURER),
            value: None,
            timestamp: None,
        }
    }
}

impl Sensor for AccelerometerSensor {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn unit(&self) -> &'static str {
        Self::UNIT
    }

    fn value(&self) -> Option<SensorValue> {
        self.value.map(SensorValue::Axes)
    }

    fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    fn update_measurement<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let range = -Self::AXIS_LIMIT..=Self::AXIS_LIMIT;
        self.value = Some(Axes {
            x_axis: rng.random_range(range.clone()),
            y_axis: rng.random_range(range.clone()),
            z_axis: rng.random_range(range),
        });
        self.timestamp = Some(advance(self.timestamp));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn should_start_without_value() {
        let sensor = AccelerometerSensor::new(DeviceId::new("a"));
        assert!(sensor.value().is_none());
        assert_eq!(sensor.sample().unit, "Acceleration");
    }

    #[test]
    fn should_keep_every_axis_within_limit() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sensor = AccelerometerSensor::new(DeviceId::new("a"));
        let limit = -AccelerometerSensor::AXIS_LIMIT..=AccelerometerSensor::AXIS_LIMIT;
        for _ in 0..500 {
            sensor.update_measurement(&mut rng);
            let Some(SensorValue::Axes(axes)) = sensor.value() else {
                panic!("expected an axes reading");
            };
            assert!(limit.contains(&axes.x_axis));
            assert!(limit.contains(&axes.y_axis));
            assert!(limit.contains(&axes.z_axis));
        }
    }

    #[test]
    fn should_serialize_value_as_named_axes() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sensor = AccelerometerSensor::new(DeviceId::new("a"));
        sensor.update_measurement(&mut rng);
        let json = serde_json::to_value(sensor.sample()).unwrap();
        assert!(json["value"]["x_axis"].is_i64());
        assert!(json["value"]["y_axis"].is_i64());
        assert!(json["value"]["z_axis"].is_i64());
        assert!(json["timestamp"].is_i64());
    }
}
