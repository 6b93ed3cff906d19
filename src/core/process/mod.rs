// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning with concurrent output draining.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .capture_output()
//!   .run(&pool)
//!       --> tokio::process::Command
//!           stdout --> info!   (drain task)
//!           stderr --> warn!   (drain task)
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
pub mod pool;
mod runner;

pub use builder::{OutputStream, ProcessBuilder, ProcessOutput, StreamFlags};
pub use pool::DrainPool;
