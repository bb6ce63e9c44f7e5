//! Device: anything addressable in the fleet: sensors, actuators and
//! composite machines.
//!
//! The variant set is closed, so dispatch goes through the [`Device`] enum
//! rather than trait objects. Capabilities a variant lacks fail with
//! [`UnimplementedCapabilityError`].

use rand::Rng;

use crate::actuator::Switch;
use crate::error::{FablineError, TypeMismatchError, UnimplementedCapabilityError};
use crate::id::DeviceId;
use crate::machine::IndustrialMachine;
use crate::sensor::{AccelerometerSensor, EnergySensor, Sensor, TemperatureSensor};
use crate::snapshot::{Description, DeviceDescription, Measurement};

/// Manufacturer reported by every built-in device.
pub const MANUFACTURER: &str = "Acme Inc.";

/// Identity shared by every device. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    device_id: DeviceId,
    device_type: String,
    manufacturer: String,
}

impl DeviceInfo {
    #[must_use]
    pub fn new(
        device_id: DeviceId,
        device_type: impl Into<String>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            device_id,
            device_type: device_type.into(),
            manufacturer: manufacturer.into(),
        }
    }

    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    #[must_use]
    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    #[must_use]
    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Generic description `{device_id, device_type, device_manufacturer}`.
    #[must_use]
    pub fn describe(&self) -> DeviceDescription {
        DeviceDescription {
            device_id: self.device_id.clone(),
            device_type: self.device_type.clone(),
            device_manufacturer: self.manufacturer.clone(),
        }
    }
}

/// Closed set of device variants.
#[derive(Debug, Clone)]
pub enum Device {
    Temperature(TemperatureSensor),
    Energy(EnergySensor),
    Accelerometer(AccelerometerSensor),
    Switch(Switch),
    Machine(IndustrialMachine),
}

impl Device {
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        match self {
            Self::Temperature(d) => d.info(),
            Self::Energy(d) => d.info(),
            Self::Accelerometer(d) => d.info(),
            Self::Switch(d) => d.info(),
            Self::Machine(d) => d.info(),
        }
    }

    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        self.info().device_id()
    }

    #[must_use]
    pub fn device_type(&self) -> &str {
        self.info().device_type()
    }

    /// Description snapshot. Machines return their nested description.
    #[must_use]
    pub fn describe(&self) -> Description {
        match self {
            Self::Temperature(d) => d.describe().into(),
            Self::Energy(d) => d.describe().into(),
            Self::Accelerometer(d) => d.describe().into(),
            Self::Switch(d) => d.describe().into(),
            Self::Machine(d) => d.describe().into(),
        }
    }

    /// Current observable state. Safe to call before any update.
    #[must_use]
    pub fn sample(&self) -> Measurement {
        match self {
            Self::Temperature(d) => d.sample().into(),
            Self::Energy(d) => d.sample().into(),
            Self::Accelerometer(d) => d.sample().into(),
            Self::Switch(d) => d.sample().into(),
            Self::Machine(d) => d.sample().into(),
        }
    }

    /// Draw a new sensor value.
    ///
    /// # Errors
    ///
    /// Returns [`UnimplementedCapabilityError`] for actuators and machines.
    pub fn update_measurement<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), UnimplementedCapabilityError> {
        match self {
            Self::Temperature(d) => d.update_measurement(rng),
            Self::Energy(d) => d.update_measurement(rng),
            Self::Accelerometer(d) => d.update_measurement(rng),
            Self::Switch(_) | Self::Machine(_) => {
                return Err(self.unsupported("update_measurement"));
            }
        }
        Ok(())
    }

    /// Invoke an actuator action.
    ///
    /// # Errors
    ///
    /// Returns [`FablineError::Unimplemented`] for sensors and machines, or
    /// [`FablineError::InvalidAction`] when the actuator rejects the action.
    pub fn invoke_action(&mut self, action_type: &str, payload: &str) -> Result<(), FablineError> {
        match self {
            Self::Switch(d) => Ok(d.invoke_action(action_type, payload)?),
            _ => Err(self.unsupported("invoke_action").into()),
        }
    }

    fn unsupported(&self, capability: &'static str) -> UnimplementedCapabilityError {
        UnimplementedCapabilityError {
            capability,
            device_type: self.device_type().to_string(),
        }
    }
}

impl From<TemperatureSensor> for Device {
    fn from(value: TemperatureSensor) -> Self {
        Self::Temperature(value)
    }
}

impl From<EnergySensor> for Device {
    fn from(value: EnergySensor) -> Self {
        Self::Energy(value)
    }
}

impl From<AccelerometerSensor> for Device {
    fn from(value: AccelerometerSensor) -> Self {
        Self::Accelerometer(value)
    }
}

impl From<Switch> for Device {
    fn from(value: Switch) -> Self {
        Self::Switch(value)
    }
}

impl From<IndustrialMachine> for Device {
    fn from(value: IndustrialMachine) -> Self {
        Self::Machine(value)
    }
}

impl TryFrom<Device> for IndustrialMachine {
    type Error = TypeMismatchError;

    fn try_from(value: Device) -> Result<Self, Self::Error> {
        match value {
            Device::Machine(machine) => Ok(machine),
            other => Err(TypeMismatchError {
                expected: IndustrialMachine::DEVICE_TYPE,
                found: other.device_type().to_string(),
            }),
        }
    }
}
