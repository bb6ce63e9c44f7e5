//! # fabline-domain
//!
//! Pure domain model for the fabline production-line simulator.
//!
//! ## Responsibilities
//! - Foundational types: device identifiers, error conventions, timestamps
//! - Define **Sensors** (temperature, energy, accelerometer) and
//!   **Actuators** (switch)
//! - Define the composite **Industrial Machine**
//! - Define the **snapshots** (descriptions and measurements) exchanged with
//!   storage, with their exact JSON shapes
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! Randomness is injected through [`rand::Rng`]; storage is expressed as a
//! trait in the `app` crate.

pub mod error;
pub mod id;
pub mod time;

pub mod actuator;
pub mod device;
pub mod machine;
pub mod sensor;
pub mod snapshot;
