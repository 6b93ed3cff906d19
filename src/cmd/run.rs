// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `run` command: wires real git and a real probe into the orchestrator.

use tracing::{error, warn};

use crate::config::Config;
use crate::core::process::DrainPool;
use crate::error::{Result, StreakResult};
use crate::git::GitCli;
use crate::logging::LogGuard;
use crate::net::ConnectivityProbe;
use crate::orchestrator::{Orchestrator, RunOutcome, RunPlan};

/// Runs one cycle and returns how it ended.
///
/// `log_guard` is closed during finalization, after the last shutdown record.
/// Ctrl+C interrupts the wait between push attempts.
///
/// # Errors
///
/// Returns an error if the probe cannot be built. The pool and the log guard
/// are released on that path too. A missing git is not an error here: it
/// aborts the run at `git add`, after the timestamp is written.
pub async fn run_command(config: &Config, log_guard: LogGuard) -> Result<RunOutcome> {
    let pool = DrainPool::new();

    let (git, probe) = match collaborators(config, &pool) {
        Ok(parts) => parts,
        Err(e) => {
            error!(error = %e, "Failed to set up the run");
            pool.shutdown().await;
            log_guard.close();
            return Err(e.into());
        }
    };

    let orchestrator = Orchestrator::new(git, probe, RunPlan::from_config(config), pool)
        .with_log_guard(log_guard);

    let cancel_token = orchestrator.cancel_token();
    let signal = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, interrupting retries...");
            cancel_token.cancel();
        }
    });

    let outcome = orchestrator.run().await;
    signal.abort();
    Ok(outcome)
}

fn collaborators(config: &Config, pool: &DrainPool) -> StreakResult<(GitCli, ConnectivityProbe)> {
    let git = GitCli::new(&config.repo.git, &config.repo.path, pool.clone());
    let probe = ConnectivityProbe::from_config(&config.probe)?;
    Ok((git, probe))
}
