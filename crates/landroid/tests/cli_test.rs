//! Integration tests for the `landroid` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! snapshot rendering and config handling against fixture snapshots.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `landroid` binary with env isolation.
///
/// Clears `LANDROID_*` variables the CLI reads, pins the locale and points
/// config directories at a nonexistent path so tests never touch the
/// user's real configuration.
fn landroid_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("landroid");
    cmd.env("HOME", "/tmp/landroid-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/landroid-cli-test-nonexistent")
        .env("LC_ALL", "C")
        .env_remove("LC_MESSAGES")
        .env_remove("LANG")
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .env_remove("LANDROID_SNAPSHOT")
        .env_remove("LANDROID_CONFIG")
        .env_remove("LANDROID_LANGUAGE")
        .env_remove("LANDROID_OUTPUT");
    cmd
}

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mowing.json")
}

/// `landroid` with the mowing fixture as snapshot.
fn with_snapshot() -> assert_cmd::Command {
    let mut cmd = landroid_cmd();
    cmd.arg("--snapshot").arg(fixture());
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_json(cmd: &mut assert_cmd::Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn stdout_text(cmd: &mut assert_cmd::Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    String::from_utf8(output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = landroid_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    landroid_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Landroid")
            .and(predicate::str::contains("show"))
            .and(predicate::str::contains("menu"))
            .and(predicate::str::contains("service")),
    );
}

#[test]
fn test_version_flag() {
    landroid_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("landroid"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    landroid_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    landroid_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_ignore_missing_config() {
    landroid_cmd()
        .args(["--config", "/tmp/landroid-cli-test-nonexistent/x.toml", "completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("landroid"));
}

// ── Diagnostics ─────────────────────────────────────────────────────

#[test]
fn test_verbose_logs_to_stderr() {
    with_snapshot()
        .args(["-vv", "--output", "json", "show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("rendering"))
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_quiet_silences_output_and_logs() {
    with_snapshot()
        .args(["-q", "-vv", "show"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

// ── Snapshot input ──────────────────────────────────────────────────

#[test]
fn test_show_without_snapshot() {
    let output = landroid_cmd().arg("show").output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("No entity snapshot"));
}

#[test]
fn test_show_missing_file() {
    let output = landroid_cmd()
        .args(["show", "--snapshot", "/tmp/landroid-cli-test-nonexistent/none.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_show_malformed_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let output = landroid_cmd().arg("show").arg("--snapshot").arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(5));
    assert!(combined_output(&output).contains("Malformed entity snapshot"));
}

#[test]
fn test_show_from_stdin() {
    let text = std::fs::read_to_string(fixture()).unwrap();
    let json = stdout_json(
        landroid_cmd()
            .args(["show", "--snapshot", "-", "-o", "json"])
            .write_stdin(text),
    );
    assert_eq!(json["entity_id"], "vacuum.front_lawn");
}

// ── show ────────────────────────────────────────────────────────────

#[test]
fn test_show_json() {
    let json = stdout_json(with_snapshot().args(["show", "-o", "json"]));
    assert_eq!(json["status_line"], "Mowing - Zone 2");
    assert_eq!(json["state"], "mowing");
    assert_eq!(json["view"]["battery"]["percent"], 87);
    assert_eq!(json["view"]["zone"]["current"], 1);
}

#[test]
fn test_show_plain_fields() {
    let text = stdout_text(with_snapshot().args(["show", "-o", "plain", "--fields", "statistics,battery_level"]));
    assert!(text.contains("statistics.distance=12.345 km"), "{text}");
    assert!(text.contains("battery_level=87%"), "{text}");
    assert!(!text.contains("rssi="), "{text}");
}

#[test]
fn test_show_table_localized() {
    let text = stdout_text(with_snapshot().args(["show", "--language", "de", "--color", "never"]));
    assert!(text.contains("Mäht - Zone 2"), "{text}");
    assert!(text.contains("Front lawn (vacuum.front_lawn)"), "{text}");
}

// ── format / fields ─────────────────────────────────────────────────

#[test]
fn test_format_percent() {
    let text = stdout_text(landroid_cmd().args(["format", "battery_level", "87", "-o", "plain"]));
    insta::assert_snapshot!(text.trim_end(), @"87%");
}

#[test]
fn test_format_imperial_distance() {
    let text = stdout_text(landroid_cmd().args([
        "format", "distance", "1609", "--units", "imperial", "-o", "plain",
    ]));
    assert_eq!(text.trim_end(), "1 mi");
}

#[test]
fn test_format_localized_boolean() {
    let text = stdout_text(landroid_cmd().args(["format", "locked", "true", "-l", "de", "-o", "plain"]));
    assert_eq!(text.trim_end(), "Ja");
}

#[test]
fn test_format_absent_and_objects_are_placeholder() {
    let text = stdout_text(landroid_cmd().args(["format", "battery_level", "-o", "plain"]));
    assert_eq!(text.trim_end(), "-");
    let json = stdout_json(landroid_cmd().args(["format", "mystery", r#"{"a":1}"#, "-o", "json"]));
    assert_eq!(json["formatted"], "-");
    assert_eq!(json["category"], "generic");
}

#[test]
fn test_fields_lists_categories() {
    let json = stdout_json(landroid_cmd().args(["fields", "-o", "json"]));
    let rows = json.as_array().unwrap();
    assert!(rows.iter().any(|r| r["field"] == "distance" && r["category"] == "distance"));
}

// ── icons / toolbar ─────────────────────────────────────────────────

#[test]
fn test_icons_follow_readings() {
    let json = stdout_json(with_snapshot().args(["icons", "-o", "json"]));
    let icon = |entry: &str| {
        json.as_array()
            .unwrap()
            .iter()
            .find(|r| r["entry"] == entry)
            .map(|r| r["icon"].clone())
            .unwrap()
    };
    assert_eq!(icon("zone"), "mdi:numeric-2-box-multiple");
    assert_eq!(icon("rssi"), "mdi:wifi-strength-3");
    assert_eq!(icon("online"), "mdi:web");
}

#[test]
fn test_toolbar_while_mowing() {
    let text = stdout_text(with_snapshot().args(["toolbar", "-o", "plain"]));
    assert_eq!(text.trim_end(), "pause\nreturn_to_base");
}

#[test]
fn test_configbar_toggles() {
    let text = stdout_text(with_snapshot().args(["toolbar", "--configbar", "-o", "plain"]));
    assert_eq!(text.trim_end(), "partymode\nlock");
}

// ── service ─────────────────────────────────────────────────────────

#[test]
fn test_service_default_route() {
    let json = stdout_json(with_snapshot().args(["service", "start", "-o", "json"]));
    assert_eq!(json["event"], "call_service");
    assert_eq!(json["domain"], "vacuum");
    assert_eq!(json["service"], "start");
    assert_eq!(json["data"]["entity_id"][0], "vacuum.front_lawn");
    assert_eq!(json["is_request"], true);
}

#[test]
fn test_service_with_data() {
    let json = stdout_json(with_snapshot().args(["service", "setzone", "-d", "zone=2", "-o", "json"]));
    assert_eq!(json["domain"], "landroid_cloud");
    assert_eq!(json["data"]["zone"], 2);
}

#[test]
fn test_service_more_opens_dialog() {
    let text = stdout_text(with_snapshot().args(["service", "more", "-o", "plain"]));
    assert_eq!(text.trim_end(), "more-info vacuum.front_lawn");
}

#[test]
fn test_service_unknown_action() {
    let output = with_snapshot().args(["service", "fly"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Unknown action"), "{text}");
    assert!(text.contains("return_to_base"), "{text}");
}

#[test]
fn test_service_override_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "[card]\nentity = \"vacuum.front_lawn\"\n\n[card.actions.start]\nservice = \"script.gentle_start\"\n",
    )
    .unwrap();
    let text = stdout_text(
        with_snapshot()
            .arg("--config")
            .arg(&config)
            .args(["service", "start", "-o", "plain"]),
    );
    assert_eq!(text.trim_end(), "script.gentle_start");
}

// ── menu ────────────────────────────────────────────────────────────

#[test]
fn test_menu_delay_options() {
    let text = stdout_text(with_snapshot().args(["menu", "delay", "-o", "plain"]));
    assert_eq!(text.lines().count(), 48);
}

#[test]
fn test_menu_zone_selection() {
    let json = stdout_json(with_snapshot().args(["menu", "zone", "--select", "2", "-o", "json"]));
    assert_eq!(json["domain"], "landroid_cloud");
    assert_eq!(json["service"], "setzone");
    assert_eq!(json["data"]["zone"], "2");
    assert_eq!(json["is_request"], false);
}

#[test]
fn test_menu_invalid_option() {
    let output = with_snapshot().args(["menu", "zone", "--select", "9"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_menu_unknown_kind() {
    let output = with_snapshot().args(["menu", "weather"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Unknown menu"));
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_follows_flag() {
    let text = stdout_text(landroid_cmd().args(["config", "path", "--config", "/tmp/x/landroid.toml"]));
    assert_eq!(text.trim_end(), "/tmp/x/landroid.toml");
}

#[test]
fn test_config_init_set_validate() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("landroid.toml");
    let run = |args: &[&str]| {
        let mut cmd = landroid_cmd();
        cmd.arg("--config").arg(&config).args(args);
        cmd
    };

    run(&["config", "init", "sensor.rain", "vacuum.back_lawn"]).assert().success();
    assert!(std::fs::read_to_string(&config).unwrap().contains("vacuum.back_lawn"));

    let output = run(&["config", "init", "vacuum.other"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));

    run(&["config", "set", "compact_view", "true"]).assert().success();
    let json = stdout_json(&mut run(&["config", "validate", "-o", "json"]));
    assert_eq!(json["entity"], "vacuum.back_lawn");
    assert_eq!(json["card_size"], 3);
    assert_eq!(json["image"], "landroid.svg");
    assert_eq!(json["camera_refresh_secs"], 5);

    let output = run(&["config", "set", "length", "furlong"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_config_validate_requires_entity() {
    let output = landroid_cmd().args(["config", "validate"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("Specifying an entity is required!"));
}
