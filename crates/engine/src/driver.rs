// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential fuzz loop.
//!
//! Commands run one at a time: they share the host's global UI and session
//! state, and the control channel does not support concurrent callers.

use hf_adapters::{ControlChannel, HostLauncher};
use hf_core::{CommandName, OutcomeCategory, Report, ReportAggregator};
use tracing::{debug, info};

use crate::{EngineError, ProcessSupervisor};

/// Invokes each command with no arguments and buckets the outcome.
#[derive(Debug, Default)]
pub struct FuzzDriver {
    aggregator: ReportAggregator,
}

impl FuzzDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke a single command and record its outcome.
    pub async fn step<C, L>(
        &mut self,
        supervisor: &mut ProcessSupervisor<C, L>,
        command: &CommandName,
    ) -> Result<OutcomeCategory, EngineError>
    where
        C: ControlChannel,
        L: HostLauncher,
    {
        let result = supervisor.invoke(&[command.as_str()]).await?;
        let exit_code = result.exit_code;
        let category = self.aggregator.record_result(result);
        info!(%command, %category, exit_code, "classified");
        Ok(category)
    }

    /// Run every command in order and return the finished report.
    pub async fn run<C, L>(
        mut self,
        supervisor: &mut ProcessSupervisor<C, L>,
        commands: &[CommandName],
    ) -> Result<Report, EngineError>
    where
        C: ControlChannel,
        L: HostLauncher,
    {
        let total = commands.len();
        for (index, command) in commands.iter().enumerate() {
            debug!(%command, "[{}/{}] invoking", index + 1, total);
            self.step(supervisor, command).await?;
        }

        let report = self.aggregator.finalize();
        info!(summary = %report.summary(), launches = supervisor.launch_count(), "fuzzing complete");
        Ok(report)
    }

    /// Report built so far.
    pub fn report(&self) -> &Report {
        self.aggregator.report()
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
