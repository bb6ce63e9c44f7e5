//! # fabline-adapter-storage-memory
//!
//! Process-scoped, in-memory storage adapter.
//!
//! ## Responsibilities
//! - Implement the `DeviceStore` port defined in `fabline-app::ports::storage`
//! - Keep the latest description per device (last-write-wins)
//! - Keep an append-only measurement log per device
//! - Export everything as a serializable [`StorageDump`]
//!
//! ## Dependency rule
//! Depends on `fabline-app` (for port traits) and `fabline-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod store;

pub use store::{InMemoryStorage, StorageDump};
