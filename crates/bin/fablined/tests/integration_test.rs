//! End-to-end tests for a full production session.
//!
//! Each test wires the real in-memory store, the production line service and
//! the timed monitoring driver, the same way `fablined` does.

use std::sync::Arc;
use std::time::Duration;

use fabline_adapter_storage_memory::InMemoryStorage;
use fabline_app::monitor::run_monitoring;
use fabline_app::ports::DeviceStore;
use fabline_app::services::production_line::{LineConfig, ProductionLine};
use fabline_domain::actuator::SwitchStatus;
use fabline_domain::error::FablineError;
use fabline_domain::id::DeviceId;
use fabline_domain::machine::IndustrialMachine;
use fabline_domain::snapshot::{Description, Measurement};
use rand::SeedableRng;
use rand::rngs::StdRng;

const MACHINE: &str = "industrial_machine_1";

fn line(seed: u64) -> (Arc<InMemoryStorage>, ProductionLine<Arc<InMemoryStorage>>) {
    let store = Arc::new(InMemoryStorage::new());
    let config = LineConfig {
        line_id: DeviceId::new("production_line_1"),
        name: "TestProductionLine".to_string(),
        latitude: 44.613_310_387_452_27,
        longitude: 10.892_943_550_441_561,
    };
    let line = ProductionLine::new(config, Arc::clone(&store), StdRng::seed_from_u64(seed))
        .expect("line should publish its description");
    (store, line)
}

fn switch_status(line: &ProductionLine<Arc<InMemoryStorage>>) -> SwitchStatus {
    line.machine(&DeviceId::new(MACHINE))
        .expect("machine should be on the line")
        .switch()
        .status()
}

fn line_log(store: &InMemoryStorage) -> Vec<Measurement> {
    store
        .list_measurements(&DeviceId::new("production_line_1"))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Full session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_run_start_monitor_stop_session() {
    for seed in 0..8 {
        let (store, mut line) = line(seed);
        line.add_machine(IndustrialMachine::with_defaults(DeviceId::new(MACHINE)))
            .unwrap();

        line.start().unwrap();
        assert!(line.is_running());
        assert_eq!(switch_status(&line), SwitchStatus::On);
        let log = line_log(&store);
        assert_eq!(log.len(), 1);
        assert!(matches!(&log[0], Measurement::Line(m) if m.line_status));

        let summary = run_monitoring(&mut line, 3, Duration::from_millis(1))
            .await
            .unwrap();
        let machine_samples = store.measurement_count(&DeviceId::new(MACHINE)).unwrap();
        assert!((3..=6).contains(&machine_samples), "seed {seed}: {machine_samples}");
        assert_eq!(summary.measurements, machine_samples);
        assert_eq!(summary.measurements, 3 + summary.toggles);

        line.stop().unwrap();
        assert!(!line.is_running());
        assert_eq!(switch_status(&line), SwitchStatus::Off);
        let log = line_log(&store);
        assert_eq!(log.len(), 2);
        assert!(matches!(&log[1], Measurement::Line(m) if !m.line_status));
    }
}

#[tokio::test]
async fn should_store_nested_machine_samples() {
    let (store, mut line) = line(1);
    line.add_machine(IndustrialMachine::with_defaults(DeviceId::new(MACHINE)))
        .unwrap();
    line.start().unwrap();
    run_monitoring(&mut line, 2, Duration::from_millis(1))
        .await
        .unwrap();

    let dump = serde_json::to_value(store.dump()).unwrap();
    let first = &dump["measurements"][MACHINE][0];
    assert_eq!(first["machine_id"], MACHINE);
    assert!(first["switch"]["status"].is_string());
    assert!(first["energy_sensor"]["value"].is_f64());
    assert_eq!(first["accelerometer_sensor_list"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

#[test]
fn should_mirror_membership_into_descriptions() {
    let (store, mut line) = line(1);
    line.add_machine(IndustrialMachine::with_defaults(DeviceId::new("m1")))
        .unwrap();
    line.add_machine(IndustrialMachine::with_defaults(DeviceId::new("m2")))
        .unwrap();

    let descriptions = store.list_descriptions().unwrap();
    assert_eq!(descriptions.len(), 3);
    match &descriptions[&DeviceId::new("production_line_1")] {
        Description::Line(desc) => {
            assert_eq!(desc.machine_list, [DeviceId::new("m1"), DeviceId::new("m2")]);
        }
        other => panic!("expected a line description, got {other:?}"),
    }

    line.remove_machine(&DeviceId::new("m1")).unwrap();
    let descriptions = store.list_descriptions().unwrap();
    assert_eq!(descriptions.len(), 2);
    assert!(!descriptions.contains_key(&DeviceId::new("m1")));
    assert!(!line.describe().machine_list.contains(&DeviceId::new("m1")));
}

#[test]
fn should_reject_removal_of_unknown_machine() {
    let (store, mut line) = line(1);
    line.add_machine(IndustrialMachine::with_defaults(DeviceId::new("m1")))
        .unwrap();
    let before = store.dump();

    let result = line.remove_machine(&DeviceId::new("m9"));

    assert!(matches!(result, Err(FablineError::NotFound(_))));
    assert_eq!(store.dump(), before);
}
