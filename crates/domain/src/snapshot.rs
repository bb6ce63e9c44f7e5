//! Description and measurement snapshots: the JSON shapes kept by the
//! storage manager and read by any external viewer.
//!
//! Descriptions carry static identity and topology and are overwritten on
//! every publish. Measurements are point-in-time observations appended to
//! a per-device history.

use serde::{Deserialize, Serialize};

use crate::actuator::SwitchStatus;
use crate::id::DeviceId;
use crate::time::Timestamp;

/// Identity of a leaf device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDescription {
    pub device_id: DeviceId,
    pub device_type: String,
    pub device_manufacturer: String,
}

/// Three-axis integer reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axes {
    pub x_axis: i32,
    pub y_axis: i32,
    pub z_axis: i32,
}

/// Value reported by a sensor: a scalar or a named-axis vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Scalar(f64),
    Axes(Axes),
}

/// Last observation of a sensor. `value` and `timestamp` are `null` until
/// the first update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorMeasurement {
    pub device_id: DeviceId,
    pub value: Option<SensorValue>,
    pub unit: String,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub timestamp: Option<Timestamp>,
}

/// Current status of an actuator. `timestamp` is `null` until the first
/// status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorMeasurement {
    pub device_id: DeviceId,
    pub status: SwitchStatus,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub timestamp: Option<Timestamp>,
}

/// Composite machine description with its sub-devices nested in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineDescription {
    pub machine_id: DeviceId,
    pub machine_type: String,
    pub machine_manufacturer: String,
    pub switch_id: DeviceDescription,
    pub energy_sensor_id: DeviceDescription,
    pub accelerometer_sensor_id_list: Vec<DeviceDescription>,
}

impl MachineDescription {
    /// Number of nested sub-device descriptions (sensors plus the switch).
    #[must_use]
    pub fn sub_device_count(&self) -> usize {
        self.accelerometer_sensor_id_list.len() + 2
    }
}

/// Composite machine measurement with nested sub-device samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineMeasurement {
    pub machine_id: DeviceId,
    pub switch: ActuatorMeasurement,
    pub energy_sensor: SensorMeasurement,
    pub accelerometer_sensor_list: Vec<SensorMeasurement>,
}

/// Production line description. Holds machine ids only; machine
/// descriptions are stored under their own keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDescription {
    pub line_id: DeviceId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub machine_list: Vec<DeviceId>,
}

/// Production line running state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineMeasurement {
    pub line_id: DeviceId,
    pub line_status: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub line_update_timestamp: Timestamp,
}

/// Any description the storage manager can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Line(LineDescription),
    Machine(MachineDescription),
    Device(DeviceDescription),
}

/// Any measurement the storage manager can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Line(LineMeasurement),
    Machine(MachineMeasurement),
    Actuator(ActuatorMeasurement),
    Sensor(SensorMeasurement),
}

macro_rules! impl_from_variant {
    ($umbrella:ident, $($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for $umbrella {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from_variant!(Description,
    Line => LineDescription,
    Machine => MachineDescription,
    Device => DeviceDescription,
);

impl_from_variant!(Measurement,
    Line => LineMeasurement,
    Machine => MachineMeasurement,
    Actuator => ActuatorMeasurement,
    Sensor => SensorMeasurement,
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn ts(ms: i64) -> Timestamp {
        chrono::Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn should_encode_device_description_with_manufacturer_key() {
        let desc = DeviceDescription {
            device_id: DeviceId::new("s1"),
            device_type: "iot.sensor.energy".to_string(),
            device_manufacturer: "Acme Inc.".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&desc).unwrap(),
            json!({
                "device_id": "s1",
                "device_type": "iot.sensor.energy",
                "device_manufacturer": "Acme Inc.",
            })
        );
    }

    #[test]
    fn should_encode_unset_sensor_fields_as_null() {
        let m = SensorMeasurement {
            device_id: DeviceId::new("s1"),
            value: None,
            unit: "kWh".to_string(),
            timestamp: None,
        };
        assert_eq!(
            serde_json::to_value(&m).unwrap(),
            json!({"device_id": "s1", "value": null, "unit": "kWh", "timestamp": null})
        );
    }

    #[test]
    fn should_encode_axes_value_as_object_and_timestamp_as_millis() {
        let m = SensorMeasurement {
            device_id: DeviceId::new("a1"),
            value: Some(SensorValue::Axes(Axes {
                x_axis: 1,
                y_axis: -2,
                z_axis: 3,
            })),
            unit: "Acceleration".to_string(),
            timestamp: Some(ts(1_700_000_000_123)),
        };
        assert_eq!(
            serde_json::to_value(&m).unwrap(),
            json!({
                "device_id": "a1",
                "value": {"x_axis": 1, "y_axis": -2, "z_axis": 3},
                "unit": "Acceleration",
                "timestamp": 1_700_000_000_123_i64,
            })
        );
    }

    #[test]
    fn should_encode_actuator_status_uppercase() {
        let m = ActuatorMeasurement {
            device_id: DeviceId::new("sw"),
            status: SwitchStatus::On,
            timestamp: Some(ts(5)),
        };
        assert_eq!(
            serde_json::to_value(&m).unwrap(),
            json!({"device_id": "sw", "status": "ON", "timestamp": 5})
        );
    }

    #[test]
    fn should_encode_line_measurement() {
        let m = LineMeasurement {
            line_id: DeviceId::new("line"),
            line_status: true,
            line_update_timestamp: ts(42),
        };
        assert_eq!(
            serde_json::to_value(Measurement::from(m)).unwrap(),
            json!({"line_id": "line", "line_status": true, "line_update_timestamp": 42})
        );
    }

    #[test]
    fn should_decode_untagged_measurement_into_matching_variant() {
        let actuator: Measurement =
            serde_json::from_value(json!({"device_id": "sw", "status": "OFF", "timestamp": null}))
                .unwrap();
        assert!(matches!(actuator, Measurement::Actuator(_)));

        let sensor: Measurement = serde_json::from_value(
            json!({"device_id": "e", "value": 1.5, "unit": "kWh", "timestamp": 7}),
        )
        .unwrap();
        assert!(matches!(
            sensor,
            Measurement::Sensor(SensorMeasurement {
                value: Some(SensorValue::Scalar(v)),
                ..
            }) if (v - 1.5).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn should_decode_untagged_description_into_matching_variant() {
        let line: Description = serde_json::from_value(json!({
            "line_id": "l",
            "name": "Line",
            "latitude": 1.0,
            "longitude": 2.0,
            "machine_list": ["m1"],
        }))
        .unwrap();
        assert!(matches!(line, Description::Line(ref d) if d.machine_list.len() == 1));
    }
}
