// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run(&pool)
//!     |
//!     v
//! pool open? --no--> PoolClosed
//!     |
//!     v
//! build_command()
//! args, cwd, env, piped stdio
//!     |
//!     v
//!  spawn() --err--> SpawnFailed
//!     |
//!     v
//! run_child: drain x2 + wait + join
//!     |
//!     v
//! exit_code != 0 --> NonZeroExit { code }
//!     |
//!     v
//! ProcessOutput
//! ```

use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessOutput};
use super::pool::DrainPool;
use crate::error::{ProcessError, StreakResult};

impl ProcessBuilder {
    /// Returns the display name for this process.
    pub(super) fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns the process and waits for it to exit.
    ///
    /// Both output streams are drained on `pool` while the process runs, and
    /// every line has been logged before this returns.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if:
    /// - The pool has already been shut down (`PoolClosed`).
    /// - The executable cannot be started (`SpawnFailed`).
    /// - Waiting on the process fails (`OutputError`).
    /// - The process exits with a non-zero status (`NonZeroExit`).
    pub async fn run(self, pool: &DrainPool) -> StreakResult<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        pool.ensure_open(&cmd_line)?;

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &cmd_line, &mut child, pool).await?;

        if !output.success() {
            return Err(ProcessError::NonZeroExit {
                command: cmd_line,
                code: output.exit_code(),
            }
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        for (key, value) in self.env_vars() {
            command.env(key, value);
        }

        // Both streams are always piped so they can be drained.
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        command.kill_on_drop(true);

        command
    }
}
