// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE      ← Additional config files (can repeat)
//! -C, --repo DIR     ← repo.path override
//! --log-level N      ← Console verbosity (0-6)
//! --file-log-level   ← File verbosity (falls back to --log-level)
//! --log-file FILE    ← global.log_file override
//! --max-retries N    ← retry.max_retries override
//! --retry-delay SECS ← retry.delay_secs override
//!
//! Precedence: CLI flags > STREAK_* env > --config > streak.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;

/// Default config file, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "streak.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "STREAK";

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Disables auto loading of `streak.toml`, only uses --config.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,

    /// Git working tree to commit in.
    #[arg(short = 'C', long = "repo", value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Push retries after the first attempt.
    #[arg(long = "max-retries", value_name = "N")]
    pub max_retries: Option<u32>,

    /// Seconds to wait between push attempts.
    #[arg(long = "retry-delay", value_name = "SECS")]
    pub retry_delay: Option<u64>,
}

impl GlobalOptions {
    /// Converts command-line options to `section.key` configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level", level.to_string()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level", level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file", path.display().to_string()));
        }

        if let Some(ref repo) = self.repo {
            overrides.push(("repo.path", repo.display().to_string()));
        }

        if let Some(retries) = self.max_retries {
            overrides.push(("retry.max_retries", retries.to_string()));
        }

        if let Some(delay) = self.retry_delay {
            overrides.push(("retry.delay_secs", delay.to_string()));
        }

        overrides
    }

    /// Stacks every configuration source in precedence order.
    #[must_use]
    pub fn config_loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::new();
        if !self.no_default_config {
            loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
        }
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }
        loader = loader.with_env_prefix(ENV_PREFIX);
        for (key, value) in self.to_config_overrides() {
            loader = loader.set(key, value);
        }
        loader
    }
}
