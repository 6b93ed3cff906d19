// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;

use super::{Orchestrator, RunOutcome, RunPlan};
use crate::core::process::DrainPool;
use crate::error::{ProcessError, StreakResult};
use crate::git::Vcs;
use crate::net::Probe;
use crate::retry::{RetryOutcome, RetryPolicy};

fn exit_failure(command: &str) -> StreakResult<()> {
    Err(ProcessError::NonZeroExit {
        command: command.to_string(),
        code: 1,
    }
    .into())
}

/// Records every call; `push` fails until `push_failures` is used up.
#[derive(Clone, Default)]
struct FakeVcs {
    calls: Arc<Mutex<Vec<String>>>,
    push_failures: Arc<AtomicU32>,
    fail_commit: bool,
}

impl FakeVcs {
    fn failing_pushes(n: u32) -> Self {
        let vcs = Self::default();
        vcs.push_failures.store(n, Ordering::SeqCst);
        vcs
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn pushes(&self) -> usize {
        self.calls().iter().filter(|c| *c == "push").count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Vcs for FakeVcs {
    async fn add(&self, paths: &[&Path]) -> StreakResult<()> {
        let joined: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        self.record(format!("add {}", joined.join(" ")));
        Ok(())
    }

    async fn commit(&self, message: &str) -> StreakResult<()> {
        self.record(format!("commit {message}"));
        if self.fail_commit {
            return exit_failure("git commit");
        }
        Ok(())
    }

    async fn push(&self) -> StreakResult<()> {
        self.record("push".to_string());
        let remaining = self.push_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.push_failures.store(remaining - 1, Ordering::SeqCst);
            return exit_failure("git push");
        }
        Ok(())
    }
}

#[derive(Clone)]
struct FakeProbe {
    online: bool,
    checks: Arc<AtomicUsize>,
}

impl FakeProbe {
    fn new(online: bool) -> Self {
        Self {
            online,
            checks: Arc::default(),
        }
    }

    fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl Probe for FakeProbe {
    async fn is_reachable(&self) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.online
    }
}

struct Fixture {
    dir: TempDir,
    pool: DrainPool,
    finalized: Arc<AtomicUsize>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            pool: DrainPool::new(),
            finalized: Arc::default(),
        }
    }

    fn plan(&self, max_retries: u32) -> RunPlan {
        RunPlan::new(
            self.dir.path(),
            self.dir.path().join("records.txt"),
            self.dir.path().join("logRecords.log"),
        )
        .with_retry(RetryPolicy::new(max_retries, Duration::from_millis(1)))
    }

    fn orchestrator(
        &self,
        vcs: FakeVcs,
        probe: FakeProbe,
        plan: RunPlan,
    ) -> Orchestrator<FakeVcs, FakeProbe> {
        let finalized = Arc::clone(&self.finalized);
        Orchestrator::new(vcs, probe, plan, self.pool.clone()).on_finalize(move || {
            finalized.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn timestamp_lines(&self) -> usize {
        std::fs::read_to_string(self.dir.path().join("records.txt"))
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }

    async fn assert_finalized_once(&self) {
        assert_eq!(self.finalized.load(Ordering::SeqCst), 1);
        assert!(self.pool.is_closed());
        assert!(!self.pool.shutdown().await, "pool was already shut down");
    }
}

#[tokio::test]
async fn test_online_run_pushes_once() {
    let fx = Fixture::new();
    let vcs = FakeVcs::default();
    let probe = FakeProbe::new(true);

    let outcome = fx.orchestrator(vcs.clone(), probe.clone(), fx.plan(2)).run().await;

    assert_eq!(outcome, RunOutcome::Pushed { attempts: 1 });
    assert!(outcome.is_pushed());
    assert_eq!(
        vcs.calls(),
        [
            "add records.txt logRecords.log",
            "commit Auto commit: Update timestamp and logs",
            "push",
        ]
    );
    assert_eq!(probe.checks(), 1);
    assert_eq!(fx.timestamp_lines(), 1);
    fx.assert_finalized_once().await;
}

#[tokio::test]
async fn test_offline_run_commits_but_never_pushes() {
    let fx = Fixture::new();
    let vcs = FakeVcs::default();

    let outcome = fx
        .orchestrator(vcs.clone(), FakeProbe::new(false), fx.plan(2))
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::SkippedOffline);
    assert_eq!(vcs.pushes(), 0);
    assert!(vcs.calls().iter().any(|c| c.starts_with("commit ")));
    assert_eq!(fx.timestamp_lines(), 1);
    fx.assert_finalized_once().await;
}

#[tokio::test]
async fn test_push_recovers_on_last_retry() {
    let fx = Fixture::new();
    let vcs = FakeVcs::failing_pushes(2);

    let outcome = fx
        .orchestrator(vcs.clone(), FakeProbe::new(true), fx.plan(2))
        .run()
        .await;

    assert_eq!(outcome, RunOutcome::Pushed { attempts: 3 });
    assert_eq!(vcs.pushes(), 3);
    fx.assert_finalized_once().await;
}

#[tokio::test]
async fn test_push_gives_up_after_max_retries() {
    let fx = Fixture::new();
    let vcs = FakeVcs::failing_pushes(u32::MAX);

    let outcome = fx
        .orchestrator(vcs.clone(), FakeProbe::new(true), fx.plan(2))
        .run()
        .await;

    assert_eq!(
        outcome,
        RunOutcome::PushFailed(RetryOutcome::Exhausted { attempts: 3 })
    );
    assert_eq!(vcs.pushes(), 3);
    fx.assert_finalized_once().await;
}

#[tokio::test]
async fn test_commit_failure_aborts_before_probe() {
    let fx = Fixture::new();
    let vcs = FakeVcs {
        fail_commit: true,
        ..FakeVcs::default()
    };
    let probe = FakeProbe::new(true);

    let outcome = fx.orchestrator(vcs.clone(), probe.clone(), fx.plan(2)).run().await;

    let reason = match outcome {
        RunOutcome::Aborted(reason) => reason,
        other => panic!("expected an aborted run, got {other:?}"),
    };
    assert!(reason.contains("git commit"), "{reason}");
    assert_eq!(probe.checks(), 0);
    assert_eq!(vcs.pushes(), 0);
    fx.assert_finalized_once().await;
}

#[tokio::test]
async fn test_unwritable_timestamp_aborts_before_git() {
    let fx = Fixture::new();
    let vcs = FakeVcs::default();
    let plan = RunPlan::new(
        fx.dir.path(),
        fx.dir.path().join("missing").join("records.txt"),
        fx.dir.path().join("logRecords.log"),
    );

    let outcome = fx
        .orchestrator(vcs.clone(), FakeProbe::new(true), plan)
        .run()
        .await;

    assert!(matches!(outcome, RunOutcome::Aborted(_)), "{outcome:?}");
    assert!(vcs.calls().is_empty());
    fx.assert_finalized_once().await;
}

#[tokio::test]
async fn test_cancel_interrupts_retry_wait() {
    let fx = Fixture::new();
    let vcs = FakeVcs::failing_pushes(u32::MAX);
    let plan = fx
        .plan(2)
        .with_retry(RetryPolicy::new(2, Duration::from_secs(3600)));

    let orchestrator = fx.orchestrator(vcs.clone(), FakeProbe::new(true), plan);
    orchestrator.cancel_token().cancel();
    let outcome = orchestrator.run().await;

    assert_eq!(
        outcome,
        RunOutcome::PushFailed(RetryOutcome::Interrupted { attempts: 1 })
    );
    assert_eq!(vcs.pushes(), 1);
    fx.assert_finalized_once().await;
}

#[tokio::test]
async fn test_each_run_appends_one_line() {
    let fx = Fixture::new();
    for _ in 0..3 {
        let pool = DrainPool::new();
        Orchestrator::new(FakeVcs::default(), FakeProbe::new(false), fx.plan(0), pool)
            .run()
            .await;
    }
    assert_eq!(fx.timestamp_lines(), 3);
}

#[test]
fn test_pathspecs_are_relative_to_repo() {
    let plan = RunPlan::new("work", "work/records.txt", "work/logs/run.log");
    assert_eq!(
        plan.pathspecs(),
        [Path::new("records.txt"), Path::new("logs/run.log")]
    );

    let plan = RunPlan::new(".", "records.txt", "/var/log/streak.log");
    assert_eq!(
        plan.pathspecs(),
        [Path::new("records.txt"), Path::new("/var/log/streak.log")]
    );
}

#[test]
fn test_plan_from_config() {
    let mut config = crate::config::Config::default();
    config.repo.path = PathBuf::from("/srv/activity");
    config.retry.max_retries = 4;
    config.resolve_and_validate().unwrap();

    let plan = RunPlan::from_config(&config);
    assert_eq!(plan.timestamp_file(), Path::new("/srv/activity/records.txt"));
    assert_eq!(plan.retry().max_attempts(), 5);
    assert_eq!(plan.commit_message(), "Auto commit: Update timestamp and logs");
}

#[test]
fn test_outcome_display() {
    let lines = [
        RunOutcome::Pushed { attempts: 1 },
        RunOutcome::PushFailed(RetryOutcome::Exhausted { attempts: 3 }),
        RunOutcome::PushFailed(RetryOutcome::Interrupted { attempts: 2 }),
        RunOutcome::SkippedOffline,
        RunOutcome::Aborted("git commit exited with code 1".to_string()),
    ]
    .map(|o| o.to_string())
    .join("\n");

    insta::assert_snapshot!(lines, @r"
    pushed after 1 attempt(s)
    push failed after 3 attempt(s)
    push interrupted after 2 attempt(s)
    push skipped, offline
    aborted: git commit exited with code 1
    ");
}
