//! # fabline-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **storage port** (`DeviceStore`) that adapters implement
//! - Provide the **`ProductionLine`** use-case: fleet membership, start/stop,
//!   and the per-tick monitoring step
//! - Provide the **timed monitoring driver** pairing each tick with a real
//!   interval
//!
//! ## Dependency rule
//! Depends on `fabline-domain` only (plus `tokio::time` for the driver).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod monitor;
pub mod ports;
pub mod services;
