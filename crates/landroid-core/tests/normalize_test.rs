//! Normalization of full host snapshots from both backend generations.
#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use landroid_core::model::EPOCH;
use landroid_core::{
    EntitySnapshot, Formatter, MowerView, UnitSystem, normalize, status_line,
};

fn load(name: &str) -> EntitySnapshot {
    let path = format!("{}/tests/fixtures/{name}.json", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(path).unwrap();
    EntitySnapshot::from_json(&text).unwrap()
}

#[test]
fn current_generation_reads_nested_sections() {
    let view = normalize(&load("current"));

    assert_eq!(view.status, "mowing");
    assert_eq!(view.state, "mowing");
    assert_eq!(view.friendly_name, "Front lawn");
    assert_eq!(view.battery.percent, 87);
    assert_eq!(view.battery.cycles.total, 412);
    assert_eq!(view.battery.cycles.reset_at, json!(400));
    assert!((view.battery.voltage - 19.84).abs() < f64::EPSILON);
    assert_eq!(view.blades.reset_at, 3000);
    assert_eq!(view.error.id, 0);
    assert!(view.firmware.auto_upgrade);
    assert_eq!(view.firmware.version, json!("3.30"));
    assert_eq!(view.zone.current, 1);
    assert_eq!(view.zone.starting_point, vec![0, 25, 50, 75]);
    assert_eq!(view.statistics.distance, 12_345);
    assert_eq!(view.capabilities, json!(["edge_cut", "one_time_schedule"]));
    assert_eq!(view.wifi_quality(), 80);
    assert_eq!(view.state_updated_at, "2024-03-05T14:07:00+00:00");
}

#[test]
fn legacy_generation_synthesizes_sections() {
    let view = normalize(&load("legacy"));

    assert_eq!(view.status, "docked");
    assert_eq!(view.battery.cycles.total, 210);
    assert_eq!(view.battery.cycles.current, 8);
    assert_eq!(view.battery.percent, 100);
    assert!((view.battery.temperature - 18.2).abs() < f64::EPSILON);
    assert!(!view.battery.charging);

    assert_eq!(view.blades.total_on, 5000);
    assert_eq!(view.blades.current_on, 1200);
    assert_eq!(view.blades.reset_at, 3800);
    assert_eq!(view.blades.reset_time, "2023-11-20T10:00:00+00:00");

    // A flat `error` string is the legacy description, not a section.
    assert_eq!(view.error.id, 0);
    assert_eq!(view.error.description, "none");

    assert_eq!(view.firmware.version, json!(5.38));
    assert_eq!(view.mac_address, "11:22:33:44:55:66");
    assert_eq!(view.serial_number, "20190012345678901234");
    assert!((view.orientation.yaw - 270.0).abs() < f64::EPSILON);

    assert_eq!(view.zone.index, 2);
    assert_eq!(view.zone.starting_point, vec![0, 10, 20, 30]);
    assert_eq!(view.zone.indicies.len(), 10);

    assert_eq!(view.statistics.worktime_blades_on, 73_125);
    assert_eq!(view.statistics.worktime_total, 0);
    assert_eq!(view.state_updated_at, "2024-03-05T06:00:00+00:00");
    assert_eq!(view.next_scheduled_start, EPOCH);
}

#[test]
fn empty_snapshot_is_all_defaults() {
    let snapshot = EntitySnapshot::from_json(r#"{"entity_id":"vacuum.x","attributes":{}}"#).unwrap();
    let view = normalize(&snapshot);
    assert_eq!(view, MowerView::default());
}

#[test]
fn normalizing_a_view_is_stable() {
    let first = normalize(&load("current"));
    let again = normalize(&EntitySnapshot::new(
        "vacuum.front_lawn",
        "cleaning",
        first.to_attributes(),
    ));
    assert_eq!(again, first);
}

#[test]
fn rendered_views() {
    let current = normalize(&load("current"));
    let legacy = normalize(&load("legacy"));

    let en = Formatter::default();
    let ctx = en.context();
    assert_eq!(status_line(&current, &ctx), "Mowing - Zone 2");
    assert_eq!(status_line(&legacy, &ctx), "Docked");
    assert_eq!(
        ctx.format("distance", Some(&Value::from(current.statistics.distance))),
        "12.345 km"
    );

    let de = Formatter::new("de", UnitSystem::imperial());
    let ctx = de.context();
    assert_eq!(status_line(&current, &ctx), "Mäht - Zone 2");
    assert_eq!(
        ctx.format("distance", Some(&Value::from(legacy.statistics.distance))),
        "1 mi"
    );
    assert_eq!(ctx.format("locked", Some(&Value::from(legacy.locked))), "Nein");
}
