//! Integration tests for the trend command

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::moodiary_cmd;

fn diary_with_entries() -> TempDir {
    let temp = TempDir::new().unwrap();
    moodiary_cmd()
        .arg("init")
        .arg(temp.path())
        .args(["--entries", "multiple"])
        .assert()
        .success();

    for args in [
        ["2024-03-10", "happy", "08:00"],
        ["2024-03-12", "sad", "09:00"],
        ["2024-03-12", "veryhappy", "21:00"],
    ] {
        moodiary_cmd()
            .current_dir(temp.path())
            .args(["save", args[0], args[1], "--time", args[2]])
            .assert()
            .success();
    }
    temp
}

#[test]
fn test_trend_dense_with_gaps() {
    let temp = diary_with_entries();

    moodiary_cmd()
        .current_dir(temp.path())
        .args(["trend", "--range", "week", "--from", "2024-03-10", "--to", "2024-03-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mood trend (week)"))
        .stdout(predicate::str::contains("2024-03-10  4.00"))
        .stdout(predicate::str::contains("2024-03-11     -"))
        .stdout(predicate::str::contains("2024-03-12  3.50"))
        .stdout(predicate::str::contains("Average 3.75 over 2 of 3 days"));
}

#[test]
fn test_trend_representative_mood_rounds_half_up() {
    let temp = diary_with_entries();

    moodiary_cmd()
        .current_dir(temp.path())
        .args(["trend", "--from", "2024-03-12", "--to", "2024-03-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3.50"))
        .stdout(predicate::str::contains("happy"));
}

#[test]
fn test_trend_inverted_range_is_empty() {
    let temp = diary_with_entries();

    moodiary_cmd()
        .current_dir(temp.path())
        .args(["trend", "--from", "2024-03-12", "--to", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No days in range"));
}

#[test]
fn test_trend_invalid_range_fails() {
    let temp = diary_with_entries();

    moodiary_cmd()
        .current_dir(temp.path())
        .args(["trend", "--range", "decade"])
        .assert()
        .failure()
        .code(3);
}
