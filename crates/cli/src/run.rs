// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single fuzzing run behind the `hackfuzz` command.

use std::time::Duration;

use anyhow::Context;
use hf_adapters::{DfhackRunChannel, LocalHostLauncher};
use hf_engine::{ProcessSupervisor, Session, SupervisorConfig, DEFAULT_SETTLE};
use tracing::info;

use crate::exit_error::ExitError;
use crate::layout::InstallLayout;
use crate::output::{print_summary, write_report};
use crate::{env, Cli};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let layout = InstallLayout::resolve(cli.dir.as_deref(), &cwd, &cli.pattern)
        .map_err(|e| ExitError::setup(e.to_string()))?;
    info!(dir = %layout.dir.display(), "using installation");

    let settle = cli
        .settle_ms
        .map(Duration::from_millis)
        .or_else(env::settle_override)
        .unwrap_or(DEFAULT_SETTLE);

    let config = SupervisorConfig::new(&layout.host_exe)
        .working_dir(&layout.dir)
        .save_name(&cli.save)
        .settle(settle);
    let channel = DfhackRunChannel::new(&layout.run_exe)
        .working_dir(&layout.dir)
        .timeout(env::channel_timeout());

    let supervisor = ProcessSupervisor::new(config, channel, LocalHostLauncher);
    let report = Session::new(supervisor).deny(cli.deny).run().await?;

    write_report(&cli.output, &report)?;
    info!(path = %cli.output.display(), commands = report.len(), "report written");

    print_summary(&report.summary(), cli.format)
}
