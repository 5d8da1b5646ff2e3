//! # CLI Tests
//!
//! Runs the demo binary with piped stdin and checks how it stops.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{fs, time::Duration};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates a screenstack command isolated from the user's config.
fn screenstack_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("screenstack").unwrap();
    cmd.env("HOME", home.path());
    cmd.env_remove("SCREENSTACK_LOG");
    cmd.env_remove("RUST_LOG");
    cmd.timeout(Duration::from_secs(20));
    cmd
}

fn write_config(home: &TempDir, content: &str) -> std::path::PathBuf {
    let path = home.path().join("custom.toml");
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    screenstack_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--confirm-quit"))
        .stdout(predicate::str::contains("--width"));
}

#[test]
fn test_quit_prints_bye() {
    let home = TempDir::new().unwrap();
    screenstack_cmd(&home)
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("screenstack"))
        .stdout(predicate::str::contains("1) About this demo"))
        .stdout(predicate::str::contains("Bye."));
}

#[test]
fn test_continue_closes_last_screen() {
    let home = TempDir::new().unwrap();
    screenstack_cmd(&home)
        .write_stdin("c\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bye.").not());
}

#[test]
fn test_confirm_quit_asks_first() {
    let home = TempDir::new().unwrap();
    screenstack_cmd(&home)
        .arg("--confirm-quit")
        .write_stdin("q\nn\nq\nyes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Do you really want to quit?"))
        .stdout(predicate::str::contains("Bye."));
}

#[test]
fn test_spoke_and_question_round_trip() {
    let home = TempDir::new().unwrap();
    screenstack_cmd(&home)
        .write_stdin("1\nc\n2\ny\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("About"))
        .stdout(predicate::str::contains("Do you like stacks?"))
        .stdout(predicate::str::contains("You like stacks."))
        .stdout(predicate::str::contains("Bye."));
}

#[test]
fn test_password_is_not_echoed() {
    let home = TempDir::new().unwrap();
    screenstack_cmd(&home)
        .write_stdin("3\nsesame\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter any password"))
        .stdout(predicate::str::contains("Password has 6 characters."))
        .stdout(predicate::str::contains("sesame").not());
}

#[test]
fn test_config_file_sets_title_and_keys() {
    let home = TempDir::new().unwrap();
    let path = write_config(&home, "title = \"Custom Shell\"\n\n[keys]\nquit = \"x\"\n");

    screenstack_cmd(&home)
        .arg("--config")
        .arg(&path)
        .write_stdin("q\nx\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Custom Shell"))
        .stdout(predicate::str::contains("'x' to quit"))
        .stdout(predicate::str::contains("Bye."));
}

#[test]
fn test_width_flag_sets_spacer() {
    let home = TempDir::new().unwrap();
    screenstack_cmd(&home)
        .args(["--width", "30"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}\n", "=".repeat(30))))
        .stdout(predicate::str::contains("=".repeat(31)).not());
}

#[test]
fn test_malformed_config_fails() {
    let home = TempDir::new().unwrap();
    let path = write_config(&home, "width = \"wide\"\n");

    screenstack_cmd(&home)
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("Failed to parse config"));
}
