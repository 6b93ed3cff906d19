// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. streak.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. STREAK_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! STREAK_RETRY__MAX_RETRIES=5      → retry.max_retries = 5
//! STREAK_REPO__PATH=/srv/activity  → repo.path = "/srv/activity"
//! STREAK_PROBE__URL=https://x.org  → probe.url = "https://x.org"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

use loader::ConfigLoader;
use types::{GlobalConfig, ProbeConfig, RepoConfig, RetryConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging options.
    pub global: GlobalConfig,
    /// Repository and tracked files.
    pub repo: RepoConfig,
    /// Push retry policy.
    pub retry: RetryConfig,
    /// Connectivity probe.
    pub probe: ProbeConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use streak_booster::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("streak.toml")
    ///     .with_env_prefix("STREAK")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values and anchor relative file paths at the repository.
    ///
    /// Calling it again leaves already anchored paths unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the probe settings are invalid.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.probe.validate()?;
        self.repo.timestamp_file = anchor(&self.repo.path, &self.repo.timestamp_file);
        self.global.log_file = anchor(&self.repo.path, &self.global.log_file);
        Ok(())
    }

    /// Format configuration options for display, one `key = value` per line,
    /// deterministically ordered.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file", self.global.log_file.display().to_string());

        options.insert("repo.path", self.repo.path.display().to_string());
        options.insert(
            "repo.timestamp_file",
            self.repo.timestamp_file.display().to_string(),
        );
        options.insert("repo.commit_message", self.repo.commit_message.clone());
        options.insert("repo.git", self.repo.git.clone());

        options.insert("retry.max_retries", self.retry.max_retries.to_string());
        options.insert("retry.delay_secs", self.retry.delay_secs.to_string());

        options.insert("probe.url", self.probe.url.clone());
        options.insert(
            "probe.connect_timeout_ms",
            self.probe.connect_timeout_ms.to_string(),
        );
        options.insert(
            "probe.read_timeout_ms",
            self.probe.read_timeout_ms.to_string(),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

/// Joins a relative `file` onto `base`; absolute paths, a `.` base and paths
/// already under `base` are kept as is.
fn anchor(base: &Path, file: &Path) -> PathBuf {
    if file.is_absolute()
        || base.as_os_str().is_empty()
        || base == Path::new(".")
        || file.starts_with(base)
    {
        file.to_path_buf()
    } else {
        base.join(file)
    }
}
