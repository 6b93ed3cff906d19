// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use super::{GitCli, Vcs};
use crate::core::process::DrainPool;
use crate::error::ProcessError;

fn run_git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("git should be installed");
    assert!(output.status.success(), "git {args:?} failed: {output:?}");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A working tree cloned from an empty bare remote, ready to commit and push.
fn repo_with_remote() -> (TempDir, TempDir) {
    let remote = tempfile::tempdir().unwrap();
    run_git(&["init", "-q", "--bare"], remote.path());

    let work = tempfile::tempdir().unwrap();
    run_git(&["init", "-q"], work.path());
    run_git(&["config", "user.email", "test@test.com"], work.path());
    run_git(&["config", "user.name", "Test"], work.path());
    run_git(&["config", "push.default", "current"], work.path());
    run_git(
        &["remote", "add", "origin", &remote.path().display().to_string()],
        work.path(),
    );
    (work, remote)
}

#[tokio::test]
async fn test_add_commit_push() {
    let (work, remote) = repo_with_remote();
    std::fs::write(work.path().join("records.txt"), "2026-01-01 00:00:00\n").unwrap();

    let git = GitCli::new("git", work.path(), DrainPool::new());
    git.add(&[Path::new("records.txt")]).await.unwrap();
    git.commit("Auto commit: Update timestamp and logs").await.unwrap();
    git.push().await.unwrap();

    let subject = run_git(&["log", "-1", "--format=%s", "--all"], remote.path());
    assert_eq!(subject, "Auto commit: Update timestamp and logs");
}

#[tokio::test]
async fn test_commit_with_nothing_staged_fails() {
    let (work, _remote) = repo_with_remote();
    let git = GitCli::new("git", work.path(), DrainPool::new());

    let err = git.commit("empty").await.expect_err("nothing to commit");
    assert!(err.exit_code().is_some_and(|code| code != 0), "{err:?}");
}

#[tokio::test]
async fn test_push_without_remote_fails() {
    let work = tempfile::tempdir().unwrap();
    run_git(&["init", "-q"], work.path());

    let git = GitCli::new("git", work.path(), DrainPool::new());
    let err = git.push().await.expect_err("no remote configured");
    assert!(matches!(
        err.as_process(),
        Some(ProcessError::NonZeroExit { .. })
    ));
}

#[tokio::test]
async fn test_add_missing_file_fails() {
    let (work, _remote) = repo_with_remote();
    let git = GitCli::new("git", work.path(), DrainPool::new());

    let err = git
        .add(&[Path::new("does-not-exist.txt")])
        .await
        .expect_err("pathspec matches nothing");
    assert!(err.exit_code().is_some());
}

#[tokio::test]
async fn test_missing_executable_fails_each_step() {
    let work = tempfile::tempdir().unwrap();
    let git = GitCli::new("nonexistent_git_12345", work.path(), DrainPool::new());

    let err = git
        .add(&[Path::new("records.txt")])
        .await
        .expect_err("git is not installed under that name");
    assert!(matches!(
        err.as_process(),
        Some(ProcessError::ExecutableNotFound { .. })
    ));
    assert!(git.push().await.is_err());
}

#[tokio::test]
async fn test_explicit_path_fails_at_spawn() {
    let work = tempfile::tempdir().unwrap();
    let git = GitCli::new("/opt/custom/git", work.path(), DrainPool::new());
    assert_eq!(git.repo(), work.path());

    let err = git.push().await.expect_err("no git at that path");
    assert!(matches!(
        err.as_process(),
        Some(ProcessError::SpawnFailed { .. })
    ));
}
