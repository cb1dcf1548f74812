// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hackfuzz: invoke every DFHack command against a running game and report
//! which ones crash it.

mod color;
mod env;
mod exit_error;
mod layout;
mod output;
mod run;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::layout::DEFAULT_PATTERN;
use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "hackfuzz", version, styles = color::styles())]
#[command(about = "Run every DFHack command once and report crashes, tracebacks and failures")]
pub struct Cli {
    /// Installation directory (skips the pattern search)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Glob for the installation directory, relative to the current directory
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Save loaded before fuzzing, if it exists
    #[arg(long, default_value = hf_engine::DEFAULT_SAVE_NAME)]
    pub save: String,

    /// Wait after loading the save, in milliseconds
    #[arg(long)]
    pub settle_ms: Option<u64>,

    /// Skip commands starting with this prefix (repeatable)
    #[arg(long = "deny", value_name = "PREFIX")]
    pub deny: Vec<String>,

    /// Where to write the JSON report
    #[arg(long, short, default_value = "fuzz_report.json")]
    pub output: PathBuf,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env::log_filter()))
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run::run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_error::exit_code(&e));
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
