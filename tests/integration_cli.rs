// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing and the `streak` binary.

use std::process::Command as StdCommand;

use clap::Parser;
use streak_booster::cli::{Cli, Command};

fn streak() -> StdCommand {
    let mut cmd = StdCommand::new(env!("CARGO_BIN_EXE_streak"));
    cmd.arg("--no-default-config");
    cmd
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["streak", "-v"]).unwrap();
    assert_eq!(cli.resolved_command(), Command::Version);
}

#[test]
fn cli_repeatable_config() {
    let cli =
        Cli::try_parse_from(["streak", "-c", "a.toml", "-c", "b.toml", "-c", "c.toml"]).unwrap();
    assert_eq!(cli.global.configs.len(), 3);
}

#[test]
fn cli_rejects_non_numeric_retries() {
    assert!(Cli::try_parse_from(["streak", "--max-retries", "many"]).is_err());
    assert!(Cli::try_parse_from(["streak", "--retry-delay", "-1"]).is_err());
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn bin_version() {
    let output = streak().arg("version").output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        env!("CARGO_PKG_VERSION")
    );
}

#[test]
fn bin_options_reflect_flags() {
    let output = streak()
        .args(["-C", "/srv/activity", "--max-retries", "5", "options"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.contains(&"repo.path                = /srv/activity"), "{stdout}");
    assert!(lines.contains(&"retry.max_retries        = 5"), "{stdout}");
    assert!(
        lines.contains(&"repo.timestamp_file      = /srv/activity/records.txt"),
        "{stdout}"
    );
}

#[test]
fn bin_options_env_override() {
    let output = streak()
        .env("STREAK_RETRY__DELAY_SECS", "12")
        .arg("options")
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l == "retry.delay_secs         = 12"), "{stdout}");
}

#[test]
fn bin_missing_config_fails() {
    let output = streak()
        .args(["-c", "/nonexistent/streak.toml", "options"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}

#[test]
fn bin_configs_without_files() {
    let output = streak().arg("configs").output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "No configuration files loaded"
    );
}
