// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! streak [global options] [command]
//! run       (default)
//! options
//! configs
//! version
//! ```

pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Keeps a git repository active.
#[derive(Debug, Parser)]
#[command(
    name = "streak",
    author,
    version,
    about = "Commits and pushes a timestamp to keep a repository active",
    long_about = "streak-booster Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Appends the current time to a file in a git working tree,\n\
                  commits it together with the log file and pushes it when\n\
                  the network is reachable. Meant to be run by a scheduler.",
    after_help = "CONFIG FILES:\n\n\
                  By default, streak loads `streak.toml` from the current\n\
                  directory if it exists. Additional files can be given with\n\
                  --config and are applied in order. STREAK_* environment\n\
                  variables (e.g. STREAK_RETRY__MAX_RETRIES=5) override files,\n\
                  and command-line flags override everything. Use\n\
                  --no-default-config to skip `streak.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute, `run` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The requested command, defaulting to [`Command::Run`].
    #[must_use]
    pub fn resolved_command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}

/// Available commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Writes a timestamp, commits it and pushes.
    Run,

    /// Lists all options and their resolved values.
    Options,

    /// Lists the config files streak loads.
    Configs,

    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
