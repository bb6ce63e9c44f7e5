//! Storage port: descriptions (latest snapshot per device) and measurements
//! (append-only history per device).

use std::collections::BTreeMap;

use fabline_domain::error::FablineError;
use fabline_domain::id::DeviceId;
use fabline_domain::snapshot::{Description, Measurement};

/// Key-value store of device descriptions plus a per-device measurement log.
///
/// Descriptions are last-write-wins. Measurement logs are append-only:
/// insertion order is chronological order and entries are never mutated,
/// reordered or truncated. Implementations are shared across threads.
pub trait DeviceStore: Send + Sync {
    /// Insert or overwrite the description of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FablineError::Storage`] if the backend fails.
    fn put_description(&self, id: &DeviceId, description: Description) -> Result<(), FablineError>;

    /// Remove the description of `id`. A missing entry is not an error.
    /// Measurement history is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`FablineError::Storage`] if the backend fails.
    fn remove_description(&self, id: &DeviceId) -> Result<(), FablineError>;

    /// Get the latest description of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FablineError::Storage`] if the backend fails.
    fn get_description(&self, id: &DeviceId) -> Result<Option<Description>, FablineError>;

    /// All current descriptions, keyed by device id.
    ///
    /// # Errors
    ///
    /// Returns [`FablineError::Storage`] if the backend fails.
    fn list_descriptions(&self) -> Result<BTreeMap<DeviceId, Description>, FablineError>;

    /// Append a measurement to the log of `id`, creating the log on first use.
    ///
    /// # Errors
    ///
    /// Returns [`FablineError::Storage`] if the backend fails.
    fn append_measurement(
        &self,
        id: &DeviceId,
        measurement: Measurement,
    ) -> Result<(), FablineError>;

    /// Measurements of `id` in insertion order; empty when none exist.
    ///
    /// # Errors
    ///
    /// Returns [`FablineError::Storage`] if the backend fails.
    fn list_measurements(&self, id: &DeviceId) -> Result<Vec<Measurement>, FablineError>;

    /// Every measurement log, keyed by device id.
    ///
    /// # Errors
    ///
    /// Returns [`FablineError::Storage`] if the backend fails.
    fn list_all_measurements(&self) -> Result<BTreeMap<DeviceId, Vec<Measurement>>, FablineError>;

    /// Number of measurements recorded for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FablineError::Storage`] if the backend fails.
    fn measurement_count(&self, id: &DeviceId) -> Result<usize, FablineError> {
        self.list_measurements(id).map(|log| log.len())
    }
}

macro_rules! forward_device_store {
    ($($wrapper:ty),+) => {
        $(
            impl<T: DeviceStore + ?Sized> DeviceStore for $wrapper {
                fn put_description(
                    &self,
                    id: &DeviceId,
                    description: Description,
                ) -> Result<(), FablineError> {
                    (**self).put_description(id, description)
                }

                fn remove_description(&self, id: &DeviceId) -> Result<(), FablineError> {
                    (**self).remove_description(id)
                }

                fn get_description(
                    &self,
                    id: &DeviceId,
                ) -> Result<Option<Description>, FablineError> {
                    (**self).get_description(id)
                }

                fn list_descriptions(
                    &self,
                ) -> Result<BTreeMap<DeviceId, Description>, FablineError> {
                    (**self).list_descriptions()
                }

                fn append_measurement(
                    &self,
                    id: &DeviceId,
                    measurement: Measurement,
                ) -> Result<(), FablineError> {
                    (**self).append_measurement(id, measurement)
                }

                fn list_measurements(
                    &self,
                    id: &DeviceId,
                ) -> Result<Vec<Measurement>, FablineError> {
                    (**self).list_measurements(id)
                }

                fn list_all_measurements(
                    &self,
                ) -> Result<BTreeMap<DeviceId, Vec<Measurement>>, FablineError> {
                    (**self).list_all_measurements()
                }

                fn measurement_count(&self, id: &DeviceId) -> Result<usize, FablineError> {
                    (**self).measurement_count(id)
                }
            }
        )+
    };
}

forward_device_store!(&T, std::sync::Arc<T>);
