// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounded retry loop with a fixed delay.
//!
//! ```text
//!        attempt = 0
//!             |
//!             v
//!   +---> Attempting --ok--> Succeeded { attempts }
//!   |         |
//!   |        err
//!   |         |
//!   |   attempts left? --no--> Exhausted { attempts }
//!   |         |
//!   |        yes
//!   |         v
//!   +---- Waiting(delay) --cancelled--> Interrupted { attempts }
//! ```


use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::types::RetryConfig;
use crate::error::StreakResult;
use crate::git::Vcs;

/// How often and how patiently to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    #[must_use]
    pub const fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_retries, config.delay())
    }

    /// Retries after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Upper bound on attempts, `max_retries + 1`.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Terminal state of a retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// An attempt succeeded; no further attempts were made.
    Succeeded { attempts: u32 },
    /// Every allowed attempt failed.
    Exhausted { attempts: u32 },
    /// The wait between attempts was cancelled.
    Interrupted { attempts: u32 },
}

impl RetryOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Number of times the operation ran.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Succeeded { attempts }
            | Self::Exhausted { attempts }
            | Self::Interrupted { attempts } => *attempts,
        }
    }
}

/// Runs `op` until it succeeds, at most `policy.max_attempts()` times.
///
/// `op` receives the zero-based attempt number. Cancelling `cancel` while
/// waiting between attempts ends the loop at once with
/// [`RetryOutcome::Interrupted`]; an attempt already running is never cut short.
pub async fn run_with_retries<F, Fut, T>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    what: &str,
    mut op: F,
) -> RetryOutcome
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = StreakResult<T>>,
{
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(_) => {
                if attempt > 0 {
                    info!(attempt = attempt + 1, "{what} succeeded after retrying");
                }
                return RetryOutcome::Succeeded {
                    attempts: attempt + 1,
                };
            }
            Err(e) => {
                warn!(attempt = attempt + 1, error = %e, "{what} failed (attempt {})", attempt + 1);
            }
        }

        if attempt >= policy.max_retries() {
            return RetryOutcome::Exhausted {
                attempts: attempt + 1,
            };
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                error!(attempt = attempt + 1, "{what} retry interrupted, giving up");
                return RetryOutcome::Interrupted {
                    attempts: attempt + 1,
                };
            }
            () = tokio::time::sleep(policy.delay()) => {}
        }

        attempt += 1;
    }
}

/// Pushes through `vcs`, retrying per `policy`.
///
/// Returns the terminal state; only [`RetryOutcome::Succeeded`] means the
/// remote has the commit.
pub async fn push_with_retries<V: Vcs>(
    vcs: &V,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> RetryOutcome {
    run_with_retries(policy, cancel, "git push", |_| vcs.push()).await
}
