// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command execution through the git CLI.

use std::path::{Path, PathBuf};

use super::Vcs;
use crate::core::process::{DrainPool, ProcessBuilder, ProcessOutput};
use crate::error::StreakResult;

/// Runs git in a fixed working tree, draining output on a shared pool.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    repo: PathBuf,
    pool: DrainPool,
}

impl GitCli {
    /// `program` may be a path or a bare name; a bare name is looked up in
    /// PATH on every invocation, so a missing git surfaces as a failed step.
    pub fn new(program: impl AsRef<Path>, repo: impl AsRef<Path>, pool: DrainPool) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            repo: repo.as_ref().to_path_buf(),
            pool,
        }
    }

    /// The working tree git runs in.
    #[must_use]
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Builds a git invocation.
    ///
    /// `GIT_TERMINAL_PROMPT=0` and `GCM_INTERACTIVE=never` keep an unattended
    /// run from blocking on a credential prompt.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if a bare name is not in PATH.
    fn command(&self, subcommand: &str) -> StreakResult<ProcessBuilder> {
        let builder = if self.program.components().count() > 1 {
            ProcessBuilder::new(&self.program)
        } else {
            ProcessBuilder::which(&self.program.to_string_lossy())?
        };
        Ok(builder
            .arg(subcommand)
            .cwd(&self.repo)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GCM_INTERACTIVE", "never")
            .name(format!("git {subcommand}")))
    }

    async fn run(&self, builder: ProcessBuilder) -> StreakResult<ProcessOutput> {
        builder.run(&self.pool).await
    }
}

impl Vcs for GitCli {
    async fn add(&self, paths: &[&Path]) -> StreakResult<()> {
        self.run(self.command("add")?.args(paths)).await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> StreakResult<()> {
        self.run(self.command("commit")?.args(["-m", message]))
            .await?;
        Ok(())
    }

    async fn push(&self) -> StreakResult<()> {
        self.run(self.command("push")?).await?;
        Ok(())
    }
}
