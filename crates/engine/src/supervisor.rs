// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host process supervision.
//!
//! The supervisor is the only path to the control channel, so death
//! detection happens in one place. A host is relaunched lazily: a detected
//! death clears the handle, and the next `ensure_running` starts a new host
//! and reloads the save.

use std::time::Duration;

use hf_adapters::{ChannelError, ControlChannel, HostLauncher, HostProcess};
use hf_core::{CommandName, InvocationResult};
use tracing::{debug, info, warn};

use crate::{EngineError, SupervisorConfig};

const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// Launches tried before a host that keeps dying while loading the save
/// aborts the run.
pub const MAX_START_ATTEMPTS: u32 = 3;

/// Output recorded for a command that outlived the channel timeout.
pub const TIMED_OUT_MARKER: &str = "hackfuzz: no reply from host, timed out";

/// Exit code recorded for a timed-out command.
pub const TIMED_OUT_EXIT_CODE: i32 = -1;

/// Owns the host process and the channel used to drive it.
pub struct ProcessSupervisor<C, L: HostLauncher> {
    config: SupervisorConfig,
    channel: C,
    launcher: L,
    process: Option<L::Process>,
    launches: usize,
}

impl<C, L> ProcessSupervisor<C, L>
where
    C: ControlChannel,
    L: HostLauncher,
{
    pub fn new(config: SupervisorConfig, channel: C, launcher: L) -> Self {
        Self { config, channel, launcher, process: None, launches: 0 }
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Number of times the host has been launched.
    pub fn launch_count(&self) -> usize {
        self.launches
    }

    /// Whether a tracked host process is still alive.
    pub fn is_running(&mut self) -> bool {
        self.process.as_mut().is_some_and(|p| p.is_alive())
    }

    /// Launch the host unless a live one is already tracked.
    ///
    /// After a launch, loads the configured save when it exists and waits for
    /// the host to settle. A host that dies while loading is relaunched, up to
    /// [`MAX_START_ATTEMPTS`] launches. Launch failure is fatal to the run.
    pub async fn ensure_running(&mut self) -> Result<(), EngineError> {
        if self.is_running() {
            return Ok(());
        }
        if self.process.take().is_some() || self.launches > 0 {
            warn!(launch = self.launches + 1, "host is no longer running, relaunching");
        }

        for attempt in 1..=MAX_START_ATTEMPTS {
            if self.start_host().await? {
                return Ok(());
            }
            warn!(save = %self.config.save_name, attempt, "host died while loading save");
        }
        Err(EngineError::HostUnstable { attempts: MAX_START_ATTEMPTS })
    }

    /// Launch once and load the save. Returns whether the host survived.
    async fn start_host(&mut self) -> Result<bool, EngineError> {
        let process = self.launcher.launch(&self.config.launch_spec())?;
        info!(pid = process.id(), launch = self.launches + 1, "host started");
        self.process = Some(process);
        self.launches += 1;

        let save_dir = self.config.save_dir();
        if !save_dir.is_dir() {
            warn!(
                save = %save_dir.display(),
                "save not found; create a world and embark for fewer wrong-context results"
            );
            return Ok(true);
        }

        // Sent directly: going through invoke would recurse into ensure_running
        let args = vec!["load-save".to_string(), self.config.save_name.clone()];
        let reply = self.channel.send(&args).await?;
        if reply.process_died() {
            self.process = None;
            return Ok(false);
        }
        if reply.exit_code() != 0 {
            warn!(save = %self.config.save_name, exit_code = reply.exit_code(), "load-save failed");
        }
        debug!(settle = ?self.config.settle, "waiting for save to load");
        tokio::time::sleep(self.config.settle).await;
        Ok(true)
    }

    /// Run one host command and capture its result.
    ///
    /// Command failures, including host crashes and hangs past the channel
    /// timeout, are returned as data. Only harness failures (launch, channel
    /// spawn) are errors.
    pub async fn invoke<S: AsRef<str>>(&mut self, args: &[S]) -> Result<InvocationResult, EngineError> {
        self.ensure_running().await?;

        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let command = CommandName::new(args.join(" "));
        let reply = match self.channel.send(&args).await {
            Ok(reply) => reply,
            Err(ChannelError::TimedOut { after, .. }) => {
                warn!(%command, ?after, "command timed out, abandoning host");
                // The hung host is killed with its handle and relaunched next time
                self.process = None;
                let output = format!("{} after {:?}\n", TIMED_OUT_MARKER, after);
                return Ok(InvocationResult::new(command, TIMED_OUT_EXIT_CODE, output));
            }
            Err(e) => return Err(e.into()),
        };

        if reply.process_died() {
            warn!(%command, "host died during command");
            // Dropping the handle terminates anything left of the old host
            self.process = None;
        }

        let exit_code = reply.exit_code();
        Ok(InvocationResult::from_stdout(command, exit_code, &reply.into_stdout()))
    }

    /// Terminate the current host and start a fresh one.
    pub async fn restart(&mut self) -> Result<(), EngineError> {
        if let Some(process) = self.process.take() {
            info!(pid = process.id(), "restarting host");
        }
        self.ensure_running().await
    }

    /// Ask the host to exit. Never fails.
    ///
    /// Waits up to the shutdown grace period for the host to go away, then
    /// drops the handle, which kills whatever is left.
    pub async fn shutdown(mut self) {
        let Some(mut process) = self.process.take() else {
            debug!("no host to shut down");
            return;
        };

        match self.channel.send(&["die".to_string()]).await {
            Ok(reply) => debug!(exit_code = reply.exit_code(), "asked host to exit"),
            Err(e) => warn!(error = %e, "failed to ask host to exit"),
        }

        let deadline = tokio::time::Instant::now() + self.config.shutdown_grace;
        while process.is_alive() && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(SHUTDOWN_POLL).await;
        }
        if process.is_alive() {
            warn!(pid = process.id(), "host still running after grace period, killing");
        } else {
            info!("host exited");
        }
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
