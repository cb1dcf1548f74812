// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor wired to fake adapters over a temporary install directory.

use std::time::Duration;

use hf_adapters::{FakeControlChannel, FakeHostLauncher};
use tempfile::TempDir;

use crate::{ProcessSupervisor, SupervisorConfig};

pub(crate) type FakeSupervisor = ProcessSupervisor<FakeControlChannel, FakeHostLauncher>;

pub(crate) struct Harness {
    pub dir: TempDir,
    pub channel: FakeControlChannel,
    pub launcher: FakeHostLauncher,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            channel: FakeControlChannel::new(),
            launcher: FakeHostLauncher::new(),
        }
    }

    /// Create the default save directory so launches load it.
    pub fn with_save(self) -> Self {
        std::fs::create_dir_all(self.dir.path().join("data/save/region1")).unwrap();
        self
    }

    pub fn config(&self) -> SupervisorConfig {
        SupervisorConfig::new(self.dir.path().join("dfhack"))
            .settle(Duration::from_secs(10))
            .shutdown_grace(Duration::from_secs(1))
    }

    pub fn supervisor(&self) -> FakeSupervisor {
        ProcessSupervisor::new(self.config(), self.channel.clone(), self.launcher.clone())
    }
}
