//! Sensors: devices that produce a measured value on demand.
//!
//! Values are drawn from an injected [`Rng`] so callers choose between OS
//! entropy in production and a seeded source in tests.

mod accelerometer;
mod energy;
mod temperature;

pub use accelerometer::AccelerometerSensor;
pub use energy::EnergySensor;
pub use temperature::TemperatureSensor;

use rand::Rng;

use crate::device::DeviceInfo;
use crate::snapshot::{DeviceDescription, SensorMeasurement, SensorValue};
use crate::time::Timestamp;

/// Capabilities shared by every sensor.
pub trait Sensor {
    fn info(&self) -> &DeviceInfo;

    /// Unit label attached to every measurement.
    fn unit(&self) -> &'static str;

    /// Last drawn value, `None` before the first update.
    fn value(&self) -> Option<SensorValue>;

    /// Time of the last update, `None` before the first update.
    fn timestamp(&self) -> Option<Timestamp>;

    /// Draw a new value within the sensor's range and refresh the timestamp.
    fn update_measurement<R: Rng + ?Sized>(&mut self, rng: &mut R);

    fn describe(&self) -> DeviceDescription {
        self.info().describe()
    }

    fn sample(&self) -> SensorMeasurement {
        SensorMeasurement {
            device_id: self.info().device_id().clone(),
            value: self.value(),
            unit: self.unit().to_string(),
            timestamp: self.timestamp(),
        }
    }
}
