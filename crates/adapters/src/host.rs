// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host process launching and liveness probing.

use std::path::PathBuf;
use std::process::Stdio;

use thiserror::Error;

/// Process creation flag passed on Windows so a crashing host does not block
/// the run behind an error dialog.
#[cfg(windows)]
const CRASH_DIALOG_FLAGS: u32 = 0x0800_0000;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("host executable not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to launch host {}: {source}", .path.display())]
    SpawnFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What to launch, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub executable: PathBuf,
    pub working_dir: PathBuf,
}

/// A launched host process.
pub trait HostProcess: Send + 'static {
    /// OS process id, if known.
    fn id(&self) -> Option<u32>;

    /// Non-blocking liveness probe. Reaps the process if it has exited.
    fn is_alive(&mut self) -> bool;
}

/// Adapter for starting the host application
pub trait HostLauncher: Send + Sync + 'static {
    type Process: HostProcess;

    fn launch(&self, spec: &LaunchSpec) -> Result<Self::Process, LaunchError>;
}

/// Launches the host as a local child process.
///
/// The child is killed if its handle is dropped, so a session that unwinds
/// never leaves a host running.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalHostLauncher;

impl HostLauncher for LocalHostLauncher {
    type Process = LocalHostProcess;

    fn launch(&self, spec: &LaunchSpec) -> Result<LocalHostProcess, LaunchError> {
        if !spec.executable.is_file() {
            return Err(LaunchError::NotFound(spec.executable.clone()));
        }

        let mut cmd = tokio::process::Command::new(&spec.executable);
        cmd.current_dir(&spec.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        #[cfg(windows)]
        cmd.creation_flags(CRASH_DIALOG_FLAGS);

        let child = cmd
            .spawn()
            .map_err(|source| LaunchError::SpawnFailed { path: spec.executable.clone(), source })?;
        tracing::info!(pid = child.id(), exe = %spec.executable.display(), "launched host");
        Ok(LocalHostProcess { child })
    }
}

/// Handle to a host launched by [`LocalHostLauncher`].
#[derive(Debug)]
pub struct LocalHostProcess {
    child: tokio::process::Child,
}

impl HostProcess for LocalHostProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn is_alive(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                tracing::debug!(%status, "host exited");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to probe host process");
                false
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{HostLauncher, HostProcess, LaunchError, LaunchSpec};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeHostState {
        launches: Vec<LaunchSpec>,
        /// Liveness of each launched process, indexed by launch order.
        alive: Vec<bool>,
        missing: bool,
    }

    /// Fake launcher recording launches; processes live until killed.
    #[derive(Clone, Default)]
    pub struct FakeHostLauncher {
        inner: Arc<Mutex<FakeHostState>>,
    }

    impl FakeHostLauncher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every launch fail with `NotFound`.
        pub fn set_missing(&self, missing: bool) {
            self.inner.lock().missing = missing;
        }

        pub fn launches(&self) -> Vec<LaunchSpec> {
            self.inner.lock().launches.clone()
        }

        pub fn launch_count(&self) -> usize {
            self.inner.lock().launches.len()
        }

        /// Terminate the most recently launched process.
        pub fn kill_current(&self) {
            if let Some(alive) = self.inner.lock().alive.last_mut() {
                *alive = false;
            }
        }

        pub fn any_alive(&self) -> bool {
            self.inner.lock().alive.iter().any(|a| *a)
        }
    }

    impl HostLauncher for FakeHostLauncher {
        type Process = FakeHostProcess;

        fn launch(&self, spec: &LaunchSpec) -> Result<FakeHostProcess, LaunchError> {
            let mut state = self.inner.lock();
            if state.missing {
                return Err(LaunchError::NotFound(spec.executable.clone()));
            }
            state.launches.push(spec.clone());
            state.alive.push(true);
            Ok(FakeHostProcess { index: state.alive.len() - 1, inner: Arc::clone(&self.inner) })
        }
    }

    /// Process handed out by [`FakeHostLauncher`]; dropping it kills it.
    pub struct FakeHostProcess {
        index: usize,
        inner: Arc<Mutex<FakeHostState>>,
    }

    impl HostProcess for FakeHostProcess {
        fn id(&self) -> Option<u32> {
            Some(1000 + self.index as u32)
        }

        fn is_alive(&mut self) -> bool {
            self.inner.lock().alive.get(self.index).copied().unwrap_or(false)
        }
    }

    impl Drop for FakeHostProcess {
        fn drop(&mut self) {
            if let Some(alive) = self.inner.lock().alive.get_mut(self.index) {
                *alive = false;
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHostLauncher, FakeHostProcess};

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
