// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! One run: stamp, commit, probe, push, finalize.
//!
//! ```text
//!  append timestamp --> git add --> git commit --> probe
//!         |                |            |           |  \
//!        err              err          err       offline reachable
//!         |                |            |           |       |
//!         +--------> Aborted <----------+   SkippedOffline  push_with_retries
//!                        |                          |       |
//!                        v                          v       v
//!                     finalize (exactly once, on every path)
//! ```

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::core::process::DrainPool;
use crate::error::StreakResult;
use crate::git::Vcs;
use crate::logging::LogGuard;
use crate::net::Probe;
use crate::retry::{RetryOutcome, RetryPolicy, push_with_retries};
use crate::stamp;

/// What a run writes and commits.
#[derive(Debug, Clone)]
pub struct RunPlan {
    timestamp_file: PathBuf,
    log_file: PathBuf,
    repo: PathBuf,
    commit_message: String,
    retry: RetryPolicy,
}

impl RunPlan {
    #[must_use]
    pub fn new(
        repo: impl Into<PathBuf>,
        timestamp_file: impl Into<PathBuf>,
        log_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            timestamp_file: timestamp_file.into(),
            log_file: log_file.into(),
            repo: repo.into(),
            commit_message: crate::config::types::DEFAULT_COMMIT_MESSAGE.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    /// Takes paths from a resolved [`Config`].
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.repo.path,
            &config.repo.timestamp_file,
            &config.global.log_file,
        )
        .with_commit_message(&config.repo.commit_message)
        .with_retry(RetryPolicy::from_config(&config.retry))
    }

    #[must_use]
    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = message.into();
        self
    }

    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn timestamp_file(&self) -> &Path {
        &self.timestamp_file
    }

    #[must_use]
    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Paths handed to `git add`, relative to the working tree when possible.
    ///
    /// Git runs inside the repository, so a path that was anchored there for
    /// writing has to lose that prefix again.
    #[must_use]
    pub fn pathspecs(&self) -> [&Path; 2] {
        [
            self.relative_to_repo(&self.timestamp_file),
            self.relative_to_repo(&self.log_file),
        ]
    }

    fn relative_to_repo<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.repo).unwrap_or(path)
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The commit reached the remote.
    Pushed { attempts: u32 },
    /// Every push attempt failed, or the retry wait was interrupted.
    PushFailed(RetryOutcome),
    /// The probe failed; the commit stays local.
    SkippedOffline,
    /// A step before the push failed.
    Aborted(String),
}

impl RunOutcome {
    /// True only when the remote has the commit.
    #[must_use]
    pub const fn is_pushed(&self) -> bool {
        matches!(self, Self::Pushed { .. })
    }

    /// True when nothing went wrong; an offline skip counts as success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Pushed { .. } | Self::SkippedOffline)
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pushed { attempts } => write!(f, "pushed after {attempts} attempt(s)"),
            Self::PushFailed(RetryOutcome::Interrupted { attempts }) => {
                write!(f, "push interrupted after {attempts} attempt(s)")
            }
            Self::PushFailed(outcome) => {
                write!(f, "push failed after {} attempt(s)", outcome.attempts())
            }
            Self::SkippedOffline => f.write_str("push skipped, offline"),
            Self::Aborted(reason) => write!(f, "aborted: {reason}"),
        }
    }
}

type Finalizer = Box<dyn FnOnce() + Send>;

/// Drives a single run and owns everything that must be released after it.
///
/// [`Orchestrator::run`] consumes the orchestrator, so finalization can only
/// ever happen once.
pub struct Orchestrator<V, P> {
    vcs: V,
    probe: P,
    plan: RunPlan,
    pool: DrainPool,
    cancel: CancellationToken,
    finalizers: Vec<Finalizer>,
    log_guard: Option<LogGuard>,
}

impl<V: Vcs, P: Probe> Orchestrator<V, P> {
    pub fn new(vcs: V, probe: P, plan: RunPlan, pool: DrainPool) -> Self {
        Self {
            vcs,
            probe,
            plan,
            pool,
            cancel: CancellationToken::new(),
            finalizers: Vec::new(),
            log_guard: None,
        }
    }

    /// Closes `guard` last during finalization, after the shutdown records.
    #[must_use]
    pub fn with_log_guard(mut self, guard: LogGuard) -> Self {
        self.log_guard = Some(guard);
        self
    }

    /// Registers an extra release step, run once after the pool has drained.
    #[must_use]
    pub fn on_finalize(mut self, release: impl FnOnce() + Send + 'static) -> Self {
        self.finalizers.push(Box::new(release));
        self
    }

    /// Token that interrupts the retry wait when cancelled.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs every step, then finalizes.
    ///
    /// Never fails: step errors are logged and reported as
    /// [`RunOutcome::Aborted`].
    pub async fn run(self) -> RunOutcome {
        let outcome = match self.execute().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "An error occurred");
                RunOutcome::Aborted(e.to_string())
            }
        };

        info!(%outcome, "Run finished");
        self.finalize().await;
        outcome
    }

    async fn execute(&self) -> StreakResult<RunOutcome> {
        let timestamp = stamp::append_timestamp(&self.plan.timestamp_file).await?;
        info!(
            %timestamp,
            file = %self.plan.timestamp_file.display(),
            "Timestamp written to file"
        );

        self.vcs.add(&self.plan.pathspecs()).await?;
        self.vcs.commit(&self.plan.commit_message).await?;
        info!("Changes committed");

        if !self.probe.is_reachable().await {
            warn!("No internet connection. Skipping git push.");
            return Ok(RunOutcome::SkippedOffline);
        }

        let pushed = push_with_retries(&self.vcs, &self.plan.retry, &self.cancel).await;
        Ok(match pushed {
            RetryOutcome::Succeeded { attempts } => {
                info!(attempts, "Git push successful.");
                RunOutcome::Pushed { attempts }
            }
            failed => {
                error!(
                    attempts = failed.attempts(),
                    "Git push failed after {} attempt(s).",
                    failed.attempts()
                );
                RunOutcome::PushFailed(failed)
            }
        })
    }

    async fn finalize(self) {
        info!("Shutting down resources...");
        if !self.pool.shutdown().await {
            warn!("Output drain pool was already closed");
        }
        for release in self.finalizers {
            release();
        }
        info!("Shutdown completed successfully.");

        if let Some(guard) = self.log_guard {
            guard.close();
        }
    }
}
