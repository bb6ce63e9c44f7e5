//! In-memory implementation of [`DeviceStore`].

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use fabline_app::ports::DeviceStore;
use fabline_domain::error::FablineError;
use fabline_domain::id::DeviceId;
use fabline_domain::snapshot::{Description, Measurement};

#[derive(Debug, Default)]
struct Tables {
    descriptions: BTreeMap<DeviceId, Description>,
    measurements: BTreeMap<DeviceId, Vec<Measurement>>,
}

/// Description map plus per-device measurement logs, guarded by one mutex.
///
/// Both maps start empty and only grow, except for explicit description
/// removal. There is no eviction and no size cap. Reads return clones, so
/// stored history can never be mutated through a returned value.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    tables: Mutex<Tables>,
}

/// Full content of the store, in the JSON shapes of the snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageDump {
    pub descriptions: BTreeMap<DeviceId, Description>,
    pub measurements: BTreeMap<DeviceId, Vec<Measurement>>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy out every description and measurement.
    #[must_use]
    pub fn dump(&self) -> StorageDump {
        let tables = self.lock();
        StorageDump {
            descriptions: tables.descriptions.clone(),
            measurements: tables.measurements.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceStore for InMemoryStorage {
    fn put_description(&self, id: &DeviceId, description: Description) -> Result<(), FablineError> {
        self.lock().descriptions.insert(id.clone(), description);
        Ok(())
    }

    fn remove_description(&self, id: &DeviceId) -> Result<(), FablineError> {
        self.lock().descriptions.remove(id);
        Ok(())
    }

    fn get_description(&self, id: &DeviceId) -> Result<Option<Description>, FablineError> {
        Ok(self.lock().descriptions.get(id).cloned())
    }

    fn list_descriptions(&self) -> Result<BTreeMap<DeviceId, Description>, FablineError> {
        Ok(self.lock().descriptions.clone())
    }

    fn append_measurement(
        &self,
        id: &DeviceId,
        measurement: Measurement,
    ) -> Result<(), FablineError> {
        self.lock()
            .measurements
            .entry(id.clone())
            .or_default()
            .push(measurement);
        Ok(())
    }

    fn list_measurements(&self, id: &DeviceId) -> Result<Vec<Measurement>, FablineError> {
        Ok(self
            .lock()
            .measurements
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    fn list_all_measurements(&self) -> Result<BTreeMap<DeviceId, Vec<Measurement>>, FablineError> {
        Ok(self.lock().measurements.clone())
    }

    fn measurement_count(&self, id: &DeviceId) -> Result<usize, FablineError> {
        Ok(self.lock().measurements.get(id).map_or(0, Vec::len))
    }
}
