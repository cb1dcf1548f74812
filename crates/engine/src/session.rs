// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One enumeration + fuzzing session with guaranteed host shutdown.

use hf_adapters::{ControlChannel, HostLauncher};
use hf_core::{Report, DEFAULT_DENYLIST};
use tracing::info;

use crate::{list_commands, EngineError, FuzzDriver, ProcessSupervisor};

/// Owns a supervisor for the length of a run.
///
/// [`Session::run`] shuts the host down exactly once, whether the run
/// completes or fails partway. If the run unwinds instead, dropping the
/// supervisor kills the host.
pub struct Session<C, L: HostLauncher> {
    supervisor: ProcessSupervisor<C, L>,
    denylist: Vec<String>,
}

impl<C, L> Session<C, L>
where
    C: ControlChannel,
    L: HostLauncher,
{
    pub fn new(supervisor: ProcessSupervisor<C, L>) -> Self {
        Self { supervisor, denylist: DEFAULT_DENYLIST.iter().map(|p| p.to_string()).collect() }
    }

    /// Skip commands starting with any of these prefixes, in addition to
    /// the default denylist.
    pub fn deny<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.denylist.extend(prefixes.into_iter().map(Into::into));
        self
    }

    pub fn denylist(&self) -> &[String] {
        &self.denylist
    }

    /// Enumerate and fuzz every command, then shut the host down.
    pub async fn run(self) -> Result<Report, EngineError> {
        let Session { mut supervisor, denylist } = self;
        let result = fuzz(&mut supervisor, &denylist).await;
        if let Err(ref e) = result {
            info!(error = %e, "run aborted, shutting down host");
        }
        supervisor.shutdown().await;
        result
    }
}

async fn fuzz<C, L>(
    supervisor: &mut ProcessSupervisor<C, L>,
    denylist: &[String],
) -> Result<Report, EngineError>
where
    C: ControlChannel,
    L: HostLauncher,
{
    let commands = list_commands(supervisor, denylist).await?;
    FuzzDriver::new().run(supervisor, &commands).await
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
