// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: GlobalConfig, RepoConfig, RetryConfig, ProbeConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Default commit message for the automated commit.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Auto commit: Update timestamp and logs";

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to the log file. Committed alongside the timestamp file.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::INFO,
            log_file: PathBuf::from("logRecords.log"),
        }
    }
}

/// The repository being kept active.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Working tree the git commands run in.
    pub path: PathBuf,
    /// File receiving one timestamp line per run.
    pub timestamp_file: PathBuf,
    /// Message for the automated commit.
    pub commit_message: String,
    /// Git executable, a bare name is resolved via PATH.
    pub git: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            timestamp_file: PathBuf::from("records.txt"),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            git: "git".to_string(),
        }
    }
}

/// Push retry policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    /// Retries after the first attempt, so `max_retries + 1` pushes at most.
    pub max_retries: u32,
    /// Fixed pause between attempts, in seconds.
    pub delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay_secs: 60,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

/// Connectivity probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// URL receiving the HEAD request.
    pub url: String,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds.
    pub read_timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: "https://www.github.com".to_string(),
            connect_timeout_ms: 3000,
            read_timeout_ms: 3000,
        }
    }
}

impl ProbeConfig {
    /// Checks the URL scheme and timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a non-http(s) URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(invalid(
                "url",
                format!("must start with http:// or https://, got '{}'", self.url),
            ));
        }
        if self.connect_timeout_ms == 0 {
            return Err(invalid("connect_timeout_ms", "must be greater than 0".into()));
        }
        if self.read_timeout_ms == 0 {
            return Err(invalid("read_timeout_ms", "must be greater than 0".into()));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        section: "probe".to_string(),
        key: key.to_string(),
        message,
    }
}
