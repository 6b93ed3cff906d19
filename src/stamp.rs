// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Timestamp file, the artifact committed on every run.

use std::path::Path;

use chrono::{DateTime, Local, TimeZone};
use tokio::io::AsyncWriteExt;

use crate::error::{FsError, StreakResult};

/// `YYYY-MM-DD HH:MM:SS`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[must_use]
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Appends the current local time as one line to `path`, creating the file
/// if needed. Existing content is never touched.
///
/// # Errors
///
/// Returns `FsError::IoError` if the file cannot be opened or written.
pub async fn append_timestamp(path: &Path) -> StreakResult<String> {
    let timestamp = format_timestamp(&Local::now());
    append_line(path, &timestamp).await?;
    Ok(timestamp)
}

async fn append_line(path: &Path, line: &str) -> StreakResult<()> {
    let io_err = |source| FsError::IoError {
        path: path.display().to_string(),
        source,
    };

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(io_err)?;
    file.write_all(format!("{line}\n").as_bytes())
        .await
        .map_err(io_err)?;
    file.flush().await.map_err(io_err)?;
    Ok(())
}
