// streak-booster: keeps a git repository active
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Run | Options | Configs | Version
//! ```

use std::process::ExitCode;

use streak_booster::cli::global::GlobalOptions;
use streak_booster::cli::{self, Command};
use streak_booster::cmd::config::{run_configs_command, run_options_command};
use streak_booster::cmd::run::run_command;
use streak_booster::config::Config;
use streak_booster::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = cli::parse();

    match cli.resolved_command() {
        Command::Version => {
            handle_version_command();
            ExitCode::SUCCESS
        }
        Command::Configs => {
            run_configs_command(&cli.global.config_loader().format_loaded_files());
            ExitCode::SUCCESS
        }
        Command::Options => match load_config(&cli.global) {
            Some(config) => {
                run_options_command(&config);
                ExitCode::SUCCESS
            }
            None => ExitCode::FAILURE,
        },
        Command::Run => handle_run_command(&cli.global).await,
    }
}

async fn handle_run_command(global: &GlobalOptions) -> ExitCode {
    let Some(config) = load_config(global) else {
        return ExitCode::FAILURE;
    };

    let log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run_command(&config, log_guard).await {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .with_log_file(config.global.log_file.display().to_string())
        .build()
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_config(global: &GlobalOptions) -> Option<Config> {
    global
        .config_loader()
        .build()
        .map_err(|e| eprintln!("Failed to load config: {e:#}"))
        .ok()
}
