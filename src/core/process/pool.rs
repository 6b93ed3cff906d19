// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process-wide pool for output-draining tasks.
//!
//! ```text
//! DrainPool::new()          (once, at startup)
//!   spawn(drain stdout)  -+
//!   spawn(drain stderr)  -+-> TaskTracker on the runtime workers
//!   shutdown()              (once, during finalization)
//!     close + wait for outstanding drains
//! ```

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::debug;

use crate::error::{ProcessError, StreakResult};

/// Tracks every drain task spawned by the process runner.
///
/// Cloning is cheap; clones share the same tracker.
#[derive(Debug, Clone, Default)]
pub struct DrainPool {
    tracker: TaskTracker,
}

impl DrainPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once [`shutdown`](Self::shutdown) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tracker.is_closed()
    }

    /// Number of drain tasks still running.
    #[must_use]
    pub fn active(&self) -> usize {
        self.tracker.len()
    }

    /// Fails with `PoolClosed` if the pool no longer accepts work.
    pub(super) fn ensure_open(&self, command: &str) -> StreakResult<()> {
        if self.is_closed() {
            return Err(ProcessError::PoolClosed {
                command: command.to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub(super) fn spawn<F>(&self, task: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.tracker.spawn(task)
    }

    /// Stops accepting work and waits for outstanding drain tasks.
    ///
    /// Returns false if the pool was already shut down.
    pub async fn shutdown(&self) -> bool {
        let was_open = self.tracker.close();
        self.tracker.wait().await;
        debug!(was_open, "drain pool shut down");
        was_open
    }
}
