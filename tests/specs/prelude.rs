// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fluent helpers for running the binary and asserting on its output.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::OnceLock;

pub use tempfile::TempDir;

/// Path to the `hackfuzz` binary, building it first if no test build did.
pub fn binary() -> &'static Path {
    static BIN: OnceLock<PathBuf> = OnceLock::new();
    BIN.get_or_init(|| {
        if let Ok(path) = assert_cmd::cargo::cargo_bin("hackfuzz").canonicalize() {
            return path;
        }
        let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
        let status = std::process::Command::new(cargo)
            .args(["build", "-p", "hackfuzz"])
            .status()
            .expect("cargo build should start");
        assert!(status.success(), "building hackfuzz failed");
        assert_cmd::cargo::cargo_bin("hackfuzz")
    })
}

pub fn cli() -> CliBuilder {
    let mut cmd = assert_cmd::Command::new(binary());
    cmd.env("NO_COLOR", "1").env_remove("HACKFUZZ_SETTLE_MS").env_remove("HACKFUZZ_LOG");
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn arg(mut self, arg: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.arg(arg);
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().expect("binary should run");
        let run = RunAssert { output };
        assert!(run.output.status.success(), "expected success\n{}", run.describe());
        run
    }

    pub fn fails_with(mut self, code: i32) -> RunAssert {
        let output = self.cmd.output().expect("binary should run");
        let run = RunAssert { output };
        assert_eq!(run.output.status.code(), Some(code), "unexpected exit\n{}", run.describe());
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        assert!(self.stdout().contains(expected), "stdout missing {expected:?}\n{}", self.describe());
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        assert!(self.stderr().contains(expected), "stderr missing {expected:?}\n{}", self.describe());
        self
    }

    fn describe(&self) -> String {
        format!("--- stdout ---\n{}\n--- stderr ---\n{}", self.stdout(), self.stderr())
    }
}
