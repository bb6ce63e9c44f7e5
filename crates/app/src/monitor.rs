//! Timed monitoring driver.
//!
//! Pairs [`ProductionLine::tick`] with a real [`tokio::time::interval`], so
//! one tick runs per `period`. Dropping the returned future between ticks
//! cancels the run; a tick that has started always completes because
//! [`ProductionLine::tick`] is synchronous.

use std::time::Duration;

use fabline_domain::error::FablineError;
use rand::Rng;
use tokio::time::{MissedTickBehavior, interval};

use crate::ports::DeviceStore;
use crate::services::production_line::{MonitoringSummary, ProductionLine};

/// Run `ticks` monitoring steps, waiting `period` before each one.
///
/// A zero `period` runs the ticks back to back.
///
/// # Errors
///
/// The first failing tick aborts the run.
pub async fn run_monitoring<S, R>(
    line: &mut ProductionLine<S, R>,
    ticks: u32,
    period: Duration,
) -> Result<MonitoringSummary, FablineError>
where
    S: DeviceStore,
    R: Rng,
{
    if period.is_zero() {
        return line.monitor(ticks);
    }

    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick resolves immediately.
    timer.tick().await;

    let mut summary = MonitoringSummary::default();
    for _ in 0..ticks {
        timer.tick().await;
        tracing::debug!(
            line_id = %line.id(),
            tick = summary.ticks + 1,
            "monitoring production line"
        );
        let report = line.tick()?;
        summary.record(&report);
    }

    tracing::info!(
        line_id = %line.id(),
        ticks = summary.ticks,
        measurements = summary.measurements,
        toggles = summary.toggles,
        "monitoring finished"
    );
    Ok(summary)
}
