use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Wednesday noon in Los Angeles.
const WEDNESDAY_NOON: &str = "2025-03-12T12:00:00-07:00";

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/boelter_hall.json")
        .canonicalize()
        .expect("fixture dataset present")
}

fn cli() -> Command {
    cargo_bin_cmd!("indoorpath-cli")
}

fn prepare_command() -> Command {
    let mut cmd = cli();
    cmd.env("RUST_LOG", "error")
        .env_remove("INDOORPATH_DATA_PATH")
        .arg("--data")
        .arg(fixture_path())
        .arg("--at")
        .arg(WEDNESDAY_NOON);
    cmd
}

#[test]
fn route_to_category_prints_steps() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Boelter Entrance", "--to", "printer"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Path from Boelter Entrance to 4th Floor Printer (algorithm: bfs (via type), 5 hops)",
        ))
        .stdout(predicate::str::contains("3-Elevator"))
        .stdout(predicate::str::contains("Stair").not());
}

#[test]
fn route_without_accessibility_uses_stairs() {
    let mut cmd = prepare_command();
    cmd.args([
        "route",
        "--from",
        "Boelter Entrance",
        "--to",
        "4th Floor Printer",
        "--no-accessible",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("3-Stair-UpTo4"))
        .stdout(predicate::str::contains("4-Stair-DownTo3").not());
}

#[test]
fn route_json_output_matches_http_shape() {
    let mut cmd = prepare_command();
    cmd.args([
        "--format",
        "json",
        "route",
        "--from",
        "Boelter Entrance",
        "--to",
        "Room 3420",
        "--mode",
        "graph",
    ]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let body: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    assert_eq!(body["algorithm"], "bfs");
    assert_eq!(body["to"], "Room 3420");
    assert_eq!(body["steps"].as_array().map(Vec::len), Some(4));
}

#[test]
fn unknown_landmark_error_suggests_names() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Boelter Entrence", "--to", "printer"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("source landmark not found"))
        .stderr(predicate::str::contains("Did you mean 'Boelter Entrance'"));
}

#[test]
fn closed_destination_fails() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "Boelter Entrance", "--to", "Closed Lab"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("is not available"));
}

#[test]
fn unknown_mode_is_rejected_by_argument_parsing() {
    let mut cmd = prepare_command();
    cmd.args([
        "route",
        "--from",
        "Boelter Entrance",
        "--to",
        "printer",
        "--mode",
        "dijkstra",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown path mode 'dijkstra'"));
}

#[test]
fn landmarks_lists_availability() {
    let mut cmd = prepare_command();
    cmd.arg("landmarks");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Landmarks (6):"))
        .stdout(predicate::str::contains("Closed Lab"))
        .stdout(predicate::str::contains("5th Floor Printer").not());
}

#[test]
fn landmarks_filter_by_category_as_json() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "json", "landmarks", "--category", "classroom"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let rows: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Closed Lab");
    assert_eq!(rows[0]["available"], false);
    assert_eq!(rows[1]["name"], "Room 3420");
    assert_eq!(rows[1]["available"], true);
    assert_eq!(rows[1]["node"], "Room 3420 Door");
}

#[test]
fn data_path_falls_back_to_environment() {
    let mut cmd = cli();
    cmd.env("RUST_LOG", "error")
        .env("INDOORPATH_DATA_PATH", fixture_path())
        .args(["--at", WEDNESDAY_NOON, "landmarks", "--category", "printer"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("4th Floor Printer"));
}

#[test]
fn malformed_dataset_reports_context() {
    let temp = tempdir().expect("create temp dir");
    let path = temp.path().join("building.json");
    fs::write(&path, "{ \"nodes\": [").expect("write dataset");

    let mut cmd = cli();
    cmd.env("RUST_LOG", "error")
        .arg("--data")
        .arg(&path)
        .arg("landmarks");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load building data"));
}

#[test]
fn invalid_timezone_is_rejected() {
    let mut cmd = prepare_command();
    cmd.args(["--timezone", "Mars/Olympus_Mons", "landmarks"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown time zone"));
}
