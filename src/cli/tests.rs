// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::{Cli, Command};
use clap::Parser;

#[test]
fn test_no_command_means_run() {
    let cli = Cli::try_parse_from(["streak"]).unwrap();
    assert_eq!(cli.command, None);
    assert_eq!(cli.resolved_command(), Command::Run);
}

#[test]
fn test_parse_commands() {
    for (arg, expected) in [
        ("run", Command::Run),
        ("options", Command::Options),
        ("configs", Command::Configs),
        ("version", Command::Version),
    ] {
        let cli = Cli::try_parse_from(["streak", arg]).unwrap();
        assert_eq!(cli.resolved_command(), expected, "{arg}");
    }
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "streak",
        "-C",
        "/srv/activity",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "-l",
        "4",
        "--max-retries",
        "5",
        "--retry-delay",
        "10",
        "run",
    ])
    .unwrap();

    assert_eq!(cli.global.repo, Some(PathBuf::from("/srv/activity")));
    assert_eq!(
        cli.global.configs,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert_eq!(cli.global.log_level, Some(4));
    assert!(!cli.global.no_default_config);
}

#[test]
fn test_log_level_out_of_range_rejected() {
    assert!(Cli::try_parse_from(["streak", "-l", "7"]).is_err());
    assert!(Cli::try_parse_from(["streak", "--file-log-level", "9"]).is_err());
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["streak", "deploy"]).is_err());
}

#[test]
fn test_overrides() {
    let cli = Cli::try_parse_from([
        "streak",
        "-l",
        "2",
        "--log-file",
        "logs/run.log",
        "-C",
        "/srv/activity",
        "--max-retries",
        "0",
        "--retry-delay",
        "5",
    ])
    .unwrap();

    let rendered: Vec<String> = cli
        .global
        .to_config_overrides()
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    global.output_log_level=2
    global.file_log_level=2
    global.log_file=logs/run.log
    repo.path=/srv/activity
    retry.max_retries=0
    retry.delay_secs=5
    ");
}

#[test]
fn test_file_log_level_wins_over_log_level() {
    let cli = Cli::try_parse_from(["streak", "-l", "1", "--file-log-level", "5"]).unwrap();
    let overrides = cli.global.to_config_overrides();
    assert!(overrides.contains(&("global.output_log_level", "1".to_string())));
    assert!(overrides.contains(&("global.file_log_level", "5".to_string())));
}

#[test]
fn test_config_loader_applies_overrides() {
    let cli = Cli::try_parse_from([
        "streak",
        "--no-default-config",
        "--max-retries",
        "7",
        "-l",
        "0",
    ])
    .unwrap();

    let config = cli.global.config_loader().build().unwrap();
    assert_eq!(config.retry.max_retries, 7);
    assert_eq!(config.global.output_log_level.as_u8(), 0);
}

#[test]
fn test_missing_config_file_fails() {
    let cli = Cli::try_parse_from([
        "streak",
        "--no-default-config",
        "-c",
        "/nonexistent/streak.toml",
    ])
    .unwrap();
    assert!(cli.global.config_loader().build().is_err());
}
