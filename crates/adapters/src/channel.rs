// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control channel to a running host.
//!
//! Each call runs one host command and returns its exit code and stdout.
//! The production channel shells out to `dfhack-run`, which connects to the
//! host over its RPC port. When the host dies mid-call, `dfhack-run` prints
//! the RunCommand I/O error sentinel; the channel surfaces that as
//! [`ChannelReply::ProcessDied`] so callers never sniff output themselves.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use hf_core::CRASH_SENTINEL;
use thiserror::Error;

/// Errors from the channel itself, as opposed to the command it ran.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to run control channel {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("control channel call `{command}` timed out after {after:?}")]
    TimedOut { command: String, after: Duration },
}

/// Reply to a single control channel call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelReply {
    /// The host answered; the exit code may still be non-zero.
    Output { exit_code: i32, stdout: Vec<u8> },
    /// The host went away while handling the call.
    ProcessDied { exit_code: i32, stdout: Vec<u8> },
}

impl ChannelReply {
    /// Tag raw channel output, detecting the host-died sentinel.
    pub fn from_output(exit_code: i32, stdout: Vec<u8>) -> Self {
        if stdout.starts_with(CRASH_SENTINEL.as_bytes()) {
            ChannelReply::ProcessDied { exit_code, stdout }
        } else {
            ChannelReply::Output { exit_code, stdout }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ChannelReply::Output { exit_code, .. } | ChannelReply::ProcessDied { exit_code, .. } => {
                *exit_code
            }
        }
    }

    pub fn stdout(&self) -> &[u8] {
        match self {
            ChannelReply::Output { stdout, .. } | ChannelReply::ProcessDied { stdout, .. } => stdout,
        }
    }

    pub fn into_stdout(self) -> Vec<u8> {
        match self {
            ChannelReply::Output { stdout, .. } | ChannelReply::ProcessDied { stdout, .. } => stdout,
        }
    }

    pub fn process_died(&self) -> bool {
        matches!(self, ChannelReply::ProcessDied { .. })
    }
}

/// Adapter for sending commands to the host
#[async_trait]
pub trait ControlChannel: Send + Sync + 'static {
    /// Run one host command and wait for its reply.
    async fn send(&self, args: &[String]) -> Result<ChannelReply, ChannelError>;
}

/// Control channel backed by the `dfhack-run` executable.
#[derive(Debug, Clone)]
pub struct DfhackRunChannel {
    executable: PathBuf,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl DfhackRunChannel {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into(), working_dir: None, timeout: None }
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Kill calls that run longer than `timeout`. Unbounded when unset.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn executable(&self) -> &PathBuf {
        &self.executable
    }
}

#[async_trait]
impl ControlChannel for DfhackRunChannel {
    async fn send(&self, args: &[String]) -> Result<ChannelReply, ChannelError> {
        let mut cmd = tokio::process::Command::new(&self.executable);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        let output = match self.timeout {
            Some(after) => tokio::time::timeout(after, cmd.output())
                .await
                .map_err(|_| ChannelError::TimedOut { command: args.join(" "), after })?,
            None => cmd.output().await,
        }
        .map_err(|source| ChannelError::Spawn { path: self.executable.clone(), source })?;

        // Killed by a signal: no exit code to report
        let exit_code = output.status.code().unwrap_or(-1);
        tracing::debug!(command = %args.join(" "), exit_code, bytes = output.stdout.len(), "channel reply");
        Ok(ChannelReply::from_output(exit_code, output.stdout))
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ChannelError, ChannelReply, ControlChannel};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::{HashMap, HashSet, VecDeque};
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    /// Recorded channel call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ChannelCall {
        pub args: Vec<String>,
    }

    impl ChannelCall {
        pub fn line(&self) -> String {
            self.args.join(" ")
        }
    }

    #[derive(Default)]
    struct FakeChannelState {
        calls: Vec<ChannelCall>,
        /// Consumed in order before falling back to `sticky`.
        queued: HashMap<String, VecDeque<(i32, Vec<u8>)>>,
        sticky: HashMap<String, (i32, Vec<u8>)>,
        broken: HashSet<String>,
        hung: HashSet<String>,
    }

    /// Fake control channel with scripted replies keyed by the joined args.
    ///
    /// Unscripted commands succeed with empty output.
    #[derive(Clone, Default)]
    pub struct FakeControlChannel {
        inner: Arc<Mutex<FakeChannelState>>,
    }

    impl FakeControlChannel {
        pub fn new() -> Self {
            Self::default()
        }

        /// Always answer `line` with this exit code and output.
        pub fn respond(&self, line: &str, exit_code: i32, stdout: impl Into<Vec<u8>>) {
            self.inner.lock().sticky.insert(line.to_string(), (exit_code, stdout.into()));
        }

        /// Answer the next call of `line` with this reply, then fall back.
        pub fn respond_once(&self, line: &str, exit_code: i32, stdout: impl Into<Vec<u8>>) {
            self.inner
                .lock()
                .queued
                .entry(line.to_string())
                .or_default()
                .push_back((exit_code, stdout.into()));
        }

        /// Make calls of `line` fail as if the channel executable were missing.
        pub fn break_command(&self, line: &str) {
            self.inner.lock().broken.insert(line.to_string());
        }

        /// Make calls of `line` time out as if the host stopped answering.
        pub fn hang_command(&self, line: &str) {
            self.inner.lock().hung.insert(line.to_string());
        }

        pub fn calls(&self) -> Vec<ChannelCall> {
            self.inner.lock().calls.clone()
        }

        /// Joined args of every call, in order.
        pub fn lines(&self) -> Vec<String> {
            self.inner.lock().calls.iter().map(ChannelCall::line).collect()
        }

        pub fn count(&self, line: &str) -> usize {
            self.inner.lock().calls.iter().filter(|c| c.line() == line).count()
        }
    }

    #[async_trait]
    impl ControlChannel for FakeControlChannel {
        async fn send(&self, args: &[String]) -> Result<ChannelReply, ChannelError> {
            let mut state = self.inner.lock();
            let line = args.join(" ");
            state.calls.push(ChannelCall { args: args.to_vec() });

            if state.broken.contains(&line) {
                return Err(ChannelError::Spawn {
                    path: PathBuf::from("fake-dfhack-run"),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "broken"),
                });
            }

            if state.hung.contains(&line) {
                return Err(ChannelError::TimedOut { command: line, after: Duration::from_secs(30) });
            }

            let queued = state.queued.get_mut(&line).and_then(VecDeque::pop_front);
            let (exit_code, stdout) = queued
                .or_else(|| state.sticky.get(&line).cloned())
                .unwrap_or((0, Vec::new()));
            Ok(ChannelReply::from_output(exit_code, stdout))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{ChannelCall, FakeControlChannel};

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
