//! # fablined: fabline daemon
//!
//! Composition root that wires the fleet together and runs one production
//! session.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Construct the in-memory store and the production line
//! - Build the machines and attach them to the line
//! - Start the line, monitor it for the configured ticks, stop it
//! - Dump every stored description and measurement as JSON lines on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::io::Write;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fabline_adapter_storage_memory::{InMemoryStorage, StorageDump};
use fabline_app::monitor::run_monitoring;
use fabline_app::services::production_line::ProductionLine;
use fabline_domain::id::DeviceId;
use fabline_domain::snapshot::{Description, Measurement};

use crate::config::Config;

/// One line of the final dump.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum DumpRecord<'a> {
    Description {
        device_id: &'a DeviceId,
        description: &'a Description,
    },
    Measurement {
        device_id: &'a DeviceId,
        measurement: &'a Measurement,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    // Storage
    let store = Arc::new(InMemoryStorage::new());

    // Production line
    let rng = match config.monitoring.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut line = ProductionLine::new(config.line_config(), Arc::clone(&store), rng)?;
    for machine in config.machines() {
        line.add_machine(machine)?;
    }

    // Session
    line.start()?;
    let summary = run_monitoring(&mut line, config.monitoring.ticks, config.tick_interval()).await?;
    line.stop()?;

    tracing::info!(
        line_id = %line.id(),
        ticks = summary.ticks,
        measurements = summary.measurements,
        toggles = summary.toggles,
        "production session complete"
    );

    write_dump(&store.dump(), &mut std::io::stdout().lock())?;
    Ok(())
}

fn write_dump(dump: &StorageDump, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    for (device_id, description) in &dump.descriptions {
        let record = DumpRecord::Description {
            device_id,
            description,
        };
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
    }
    for (device_id, log) in &dump.measurements {
        for measurement in log {
            let record = DumpRecord::Measurement {
                device_id,
                measurement,
            };
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        }
    }
    Ok(())
}
