// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations.
//!
//! ```text
//!   Orchestrator
//!        |
//!        v
//!  ,------------,
//!  | Vcs (trait)|   add / commit / push
//!  '-----+------'
//!        |
//!        v
//!     GitCli  --> ProcessBuilder --> git
//!                 GIT_TERMINAL_PROMPT=0
//!                 GCM_INTERACTIVE=never
//! ```

pub mod cmd;

#[cfg(test)]
mod tests;

use std::future::Future;
use std::path::Path;

use crate::error::StreakResult;

pub use cmd::GitCli;

/// The three mutations a run performs on the repository.
///
/// Each call is a single attempt; retrying is the caller's decision.
pub trait Vcs {
    /// Stages `paths`.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if git cannot be started or exits non-zero.
    fn add(&self, paths: &[&Path]) -> impl Future<Output = StreakResult<()>> + Send;

    /// Commits the staged changes.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if git cannot be started or exits non-zero,
    /// which includes having nothing to commit.
    fn commit(&self, message: &str) -> impl Future<Output = StreakResult<()>> + Send;

    /// Pushes the current branch to its upstream.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if git cannot be started or exits non-zero.
    fn push(&self) -> impl Future<Output = StreakResult<()>> + Send;
}
