//! Binary-level tests for the TTY-free CLI paths.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn no_args_prints_usage_and_exits_zero() {
    Command::cargo_bin("nucamp")
        .unwrap()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: nucamp"))
        .stdout(predicate::str::contains("--demo"));
}

#[test]
fn no_args_shows_example_invocations() {
    Command::cargo_bin("nucamp")
        .unwrap()
        .assert()
        .success()
        .stdout(predicate::str::contains("Examples:"))
        .stdout(predicate::str::contains("nucamp -u https://example.com"));
}

#[test]
fn missing_scanner_exits_one_with_install_hint() {
    // An empty PATH guarantees the scanner lookup fails; terminal setup
    // is lazy, so this path never needs a TTY.
    Command::cargo_bin("nucamp")
        .unwrap()
        .env("PATH", "")
        .args(["-u", "https://example.com"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Nuclei not found"))
        .stderr(predicate::str::contains(
            "github.com/projectdiscovery/nuclei",
        ));
}

#[test]
fn help_flag_works() {
    Command::cargo_bin("nucamp")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nuclei"));
}
