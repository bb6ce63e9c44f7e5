//! Actuators: devices whose status changes only through a validated action.

use serde::{Deserialize, Serialize};

use crate::device::{DeviceInfo, MANUFACTURER};
use crate::error::InvalidActionError;
use crate::id::DeviceId;
use crate::snapshot::{ActuatorMeasurement, DeviceDescription};
use crate::time::{Timestamp, advance};

/// On/off status of a [`Switch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwitchStatus {
    On,
    #[default]
    Off,
}

impl SwitchStatus {
    /// Parse a payload case-insensitively.
    #[must_use]
    pub fn parse(payload: &str) -> Option<Self> {
        if payload.eq_ignore_ascii_case(Switch::STATUS_ON) {
            Some(Self::On)
        } else if payload.eq_ignore_ascii_case(Switch::STATUS_OFF) {
            Some(Self::Off)
        } else {
            None
        }
    }

    /// The opposite status.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    /// Wire representation (`"ON"` / `"OFF"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => Switch::STATUS_ON,
            Self::Off => Switch::STATUS_OFF,
        }
    }
}

impl std::fmt::Display for SwitchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A switch actuator responding to the `SWITCH` action.
#[derive(Debug, Clone)]
pub struct Switch {
    info: DeviceInfo,
    status: SwitchStatus,
    timestamp: Option<Timestamp>,
}

impl Switch {
    pub const DEVICE_TYPE: &'static str = "iot.actuator.switch";
    pub const ACTION_TYPE_SWITCH: &'static str = "SWITCH";
    pub const STATUS_ON: &'static str = "ON";
    pub const STATUS_OFF: &'static str = "OFF";

    /// Create a switch in the `OFF` state.
    #[must_use]
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            info: DeviceInfo::new(device_id, Self::DEVICE_TYPE, MANUFACTURER),
            status: SwitchStatus::Off,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    #[must_use]
    pub fn status(&self) -> SwitchStatus {
        self.status
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// Apply an action. Only `SWITCH` with payload `ON` or `OFF` is
    /// recognized, both matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidActionError`] for any other action type or payload,
    /// including empty strings. The status is left unchanged.
    pub fn invoke_action(
        &mut self,
        action_type: &str,
        payload: &str,
    ) -> Result<(), InvalidActionError> {
        let status = action_type
            .eq_ignore_ascii_case(Self::ACTION_TYPE_SWITCH)
            .then(|| SwitchStatus::parse(payload))
            .flatten()
            .ok_or_else(|| InvalidActionError {
                action_type: action_type.to_string(),
                payload: payload.to_string(),
            })?;

        self.status = status;
        self.timestamp = Some(advance(self.timestamp));
        Ok(())
    }

    /// Flip the status through the regular `SWITCH` action.
    ///
    /// # Errors
    ///
    /// Propagates any [`InvalidActionError`] from
    /// [`invoke_action`](Self::invoke_action).
    pub fn toggle(&mut self) -> Result<SwitchStatus, InvalidActionError> {
        let next = self.status.toggled();
        self.invoke_action(Self::ACTION_TYPE_SWITCH, next.as_str())?;
        Ok(next)
    }

    #[must_use]
    pub fn describe(&self) -> DeviceDescription {
        self.info.describe()
    }

    #[must_use]
    pub fn sample(&self) -> ActuatorMeasurement {
        ActuatorMeasurement {
            device_id: self.info.device_id().clone(),
            status: self.status,
            timestamp: self.timestamp,
        }
    }
}
