use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{tempdir, TempDir};

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("firebrigade");
    cmd.env("RUST_LOG", "error").env("NO_COLOR", "1");
    cmd
}

/// 0 - 1 - 2 - 3 - 4, every connection weight 1.
fn write_line_topology(dir: &Path) -> PathBuf {
    let path = dir.join("line.json");
    fs::write(
        &path,
        r#"{
            "location_count": 5,
            "connections": [
                { "a": 0, "b": 1, "weight": 1 },
                { "a": 1, "b": 2, "weight": 1 },
                { "a": 2, "b": 3, "weight": 1 },
                { "a": 3, "b": 4, "weight": 1 }
            ]
        }"#,
    )
    .expect("write topology fixture");
    path
}

fn line_command() -> (Command, TempDir) {
    let temp_dir = tempdir().expect("create temp dir");
    let topology = write_line_topology(temp_dir.path());
    let mut cmd = cli();
    cmd.arg("simulate")
        .arg("--topology")
        .arg(&topology)
        .args(["--station", "0", "--capacity", "2", "--start", "2"]);
    (cmd, temp_dir)
}

#[test]
fn line_topology_is_fully_extinguished() {
    let (mut cmd, _temp) = line_command();
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "[tick 0] ignition: fires [2] burned [] brigades 0@0\n  map B.*..",
        ))
        .stdout(predicate::str::contains(
            "[tick 1] after dispatch: fires [2, 3] burned [1] brigades 0@1",
        ))
        .stdout(predicate::str::contains(
            "Simulation settled after 5 ticks: all fires extinguished.\nExtinguished: [1, 2, 3, 4]",
        ));
}

#[test]
fn json_output_reports_the_outcome() {
    let (mut cmd, _temp) = line_command();
    let output = cmd
        .args(["--format", "json"])
        .output()
        .expect("run firebrigade");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["outcome"]["settled_by"], "extinguished");
    assert_eq!(report["outcome"]["ticks"], 5);
    assert_eq!(report["outcome"]["extinguished"], serde_json::json!([1, 2, 3, 4]));
    assert_eq!(report["snapshots"].as_array().map(Vec::len), Some(11));
}

#[test]
fn unreachable_fire_burns_out() {
    let temp_dir = tempdir().expect("create temp dir");
    let topology = temp_dir.path().join("pair.json");
    fs::write(&topology, r#"{ "location_count": 2, "connections": [] }"#)
        .expect("write topology fixture");

    cli()
        .arg("simulate")
        .arg("--topology")
        .arg(&topology)
        .args(["--station", "1", "--capacity", "3", "--start", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remaining fires burned out"))
        .stdout(predicate::str::contains("Burned out: [0]"));
}

#[test]
fn generated_topology_round_trips_through_simulate() {
    let temp_dir = tempdir().expect("create temp dir");
    let topology = temp_dir.path().join("generated.json");

    cli()
        .args(["generate", "--locations", "12", "--connections", "20", "--seed", "3"])
        .arg("--output")
        .arg(&topology)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 12 locations and 20 connections"));

    cli()
        .arg("simulate")
        .arg("--topology")
        .arg(&topology)
        .args(["--station", "0,6", "--water", "3", "--capacity", "2", "--start", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Simulation settled after"));
}

#[test]
fn config_file_drives_a_generated_run() {
    let temp_dir = tempdir().expect("create temp dir");
    let config = temp_dir.path().join("sim.json");
    fs::write(
        &config,
        r#"{
            "location_count": 10,
            "connection_count": 15,
            "station_locations": [0],
            "truck_capacity": 2,
            "seed": 11
        }"#,
    )
    .expect("write config fixture");

    let run = || {
        cli()
            .arg("simulate")
            .arg("--config")
            .arg(&config)
            .args(["--start", "5", "--format", "json"])
            .output()
            .expect("run firebrigade")
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn station_on_unknown_location_fails() {
    let (mut cmd, _temp) = line_command();
    cmd.args(["--station", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to place stations and water on the topology",
        ));
}

#[test]
fn missing_topology_file_fails_with_context() {
    cli()
        .args(["simulate", "--topology", "does-not-exist.json", "--capacity", "1"])
        .args(["--start", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load topology from"));
}

#[test]
fn start_is_required() {
    cli()
        .args(["simulate", "--locations", "3", "--connections", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--start"));
}
