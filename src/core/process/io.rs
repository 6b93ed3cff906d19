// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output draining for running processes.
//!
//! ```text
//! run_child()
//!   stdout reader task --> info!  per line   (on DrainPool)
//!   stderr reader task --> warn!  per line   (on DrainPool)
//!   child.wait()
//!   join both readers            (nothing logged after return)
//!   --> ProcessOutput { exit_code, kept lines }
//! ```

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::builder::{OutputStream, ProcessBuilder, ProcessOutput, StreamFlags};
use super::pool::DrainPool;
use crate::error::{ProcessError, StreakResult};

/// Configuration for a stream reader task.
struct StreamReaderConfig {
    flags: StreamFlags,
    process_name: String,
    stream: OutputStream,
}

fn spawn_reader<R>(
    reader: Option<R>,
    config: StreamReaderConfig,
    pool: &DrainPool,
) -> Option<JoinHandle<Vec<String>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    reader.map(|reader| pool.spawn(read_stream(reader, config)))
}

async fn join_reader(
    handle: Option<JoinHandle<Vec<String>>>,
    command: &str,
) -> StreakResult<Vec<String>> {
    let Some(handle) = handle else {
        return Ok(Vec::new());
    };
    handle.await.map_err(|e| {
        ProcessError::OutputError {
            command: command.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

impl ProcessBuilder {
    /// Drains both streams while waiting for the child, then joins the drains.
    pub(super) async fn run_child(
        &self,
        name: &str,
        command: &str,
        child: &mut Child,
        pool: &DrainPool,
    ) -> StreakResult<ProcessOutput> {
        let stdout_handle = spawn_reader(
            child.stdout.take(),
            StreamReaderConfig {
                flags: self.stdout_config(),
                process_name: name.to_string(),
                stream: OutputStream::Stdout,
            },
            pool,
        );
        let stderr_handle = spawn_reader(
            child.stderr.take(),
            StreamReaderConfig {
                flags: self.stderr_config(),
                process_name: name.to_string(),
                stream: OutputStream::Stderr,
            },
            pool,
        );

        let status = child.wait().await;
        if status.is_err() {
            // Readers only finish at EOF, so make sure the child is gone.
            let _ = child.start_kill();
        }

        let stdout = join_reader(stdout_handle, command).await;
        let stderr = join_reader(stderr_handle, command).await;

        let status = status.map_err(|e| ProcessError::OutputError {
            command: command.to_string(),
            message: e.to_string(),
        })?;

        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            stdout?,
            stderr?,
        ))
    }
}

/// Reads `reader` line by line until EOF, forwarding and keeping lines as
/// configured.
async fn read_stream<R>(reader: R, config: StreamReaderConfig) -> Vec<String>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut kept = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = decode_line(&buf);
                if config.flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    forward(&config, &line);
                }
                if config.flags.contains(StreamFlags::KEEP_IN_STRING) {
                    kept.push(line);
                }
            }
            Err(e) => {
                warn!(
                    process = %config.process_name,
                    stream = config.stream.as_str(),
                    error = %e,
                    "error reading process output"
                );
                break;
            }
        }
    }

    kept
}

fn forward(config: &StreamReaderConfig, line: &str) {
    match config.stream {
        OutputStream::Stdout => {
            info!(process = %config.process_name, stream = "stdout", "{line}");
        }
        OutputStream::Stderr => {
            warn!(process = %config.process_name, stream = "stderr", "{line}");
        }
    }
}

/// Strips the line terminator and decodes lossily, so a stray non-UTF-8 byte
/// never ends the drain early.
pub(super) fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
