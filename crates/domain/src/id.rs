//! Device identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a device, machine or production line.
///
/// Immutable once constructed. Sub-device ids are derived from their owner
/// with [`DeviceId::derived`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build `"{parent}_{role}"`, or `"{parent}_{role}_{index}"` when an index is given.
    #[must_use]
    pub fn derived(parent: &DeviceId, role: &str, index: Option<usize>) -> Self {
        match index {
            Some(index) => Self(format!("{}_{role}_{index}", parent.0)),
            None => Self(format!("{}_{role}", parent.0)),
        }
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DeviceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_derive_role_id_without_index() {
        let parent = DeviceId::new("machine_1");
        let id = DeviceId::derived(&parent, "switch", None);
        assert_eq!(id.as_str(), "machine_1_switch");
    }

    #[test]
    fn should_derive_role_id_with_index() {
        let parent = DeviceId::new("machine_1");
        let id = DeviceId::derived(&parent, "accelerometer", Some(2));
        assert_eq!(id.as_str(), "machine_1_accelerometer_2");
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id = DeviceId::new("line_1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"line_1\"");
    }

    #[test]
    fn should_display_inner_value() {
        assert_eq!(DeviceId::from("m").to_string(), "m");
    }
}
