// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use hf_adapters::LaunchSpec;

/// Save loaded before fuzzing when present; assumed to be an embarked fort.
pub const DEFAULT_SAVE_NAME: &str = "region1";

/// Wait after loading the save before commands are sent.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(10);

/// How long shutdown waits for the host to exit after `die`.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// How the supervisor launches and prepares the host.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Host executable
    pub executable: PathBuf,
    /// Working directory for the host; also where saves are looked up
    pub working_dir: PathBuf,
    /// Save name under `data/save/`
    pub save_name: String,
    pub settle: Duration,
    pub shutdown_grace: Duration,
}

impl SupervisorConfig {
    /// Configuration with defaults; the host runs from its own directory.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        let executable = executable.into();
        let working_dir =
            executable.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        Self {
            executable,
            working_dir,
            save_name: DEFAULT_SAVE_NAME.to_string(),
            settle: DEFAULT_SETTLE,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }

    hf_core::setters! {
        into {
            save_name: String,
            working_dir: PathBuf,
        }
        set {
            settle: Duration,
            shutdown_grace: Duration,
        }
    }

    /// Directory whose presence means the save can be loaded.
    pub fn save_dir(&self) -> PathBuf {
        self.working_dir.join("data").join("save").join(&self.save_name)
    }

    pub fn launch_spec(&self) -> LaunchSpec {
        LaunchSpec { executable: self.executable.clone(), working_dir: self.working_dir.clone() }
    }
}
