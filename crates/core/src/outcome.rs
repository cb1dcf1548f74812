// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation results and the heuristic outcome classifier.
//!
//! Classification is triage, not diagnosis. Checks run in a fixed order and
//! the first match wins:
//!
//! ```text
//! 1. exit code 0                                  -> Ok
//! 2. output mentions /hack/scripts/<command>      -> ScriptTraceback
//! 3. output starts with the RunCommand I/O error  -> Crashed
//! 4. first line mentions "cursor" or " UI"        -> WrongContext
//! 5. anything else                                -> Failed
//! ```

use serde::{Deserialize, Serialize};

use crate::CommandName;

/// Output prefix reported by the control channel when the host died mid-call.
pub const CRASH_SENTINEL: &str = "In call to ::RunCommand: I/O error in receive header.";

/// Path fragment embedded in tracebacks raised from host scripts.
const SCRIPT_PATH: &str = "/hack/scripts/";

/// Outcome bucket for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCategory {
    Ok,
    Crashed,
    ScriptTraceback,
    WrongContext,
    Failed,
}

impl OutcomeCategory {
    /// Every category, in report order.
    pub const ALL: [OutcomeCategory; 5] = [
        OutcomeCategory::Ok,
        OutcomeCategory::Crashed,
        OutcomeCategory::ScriptTraceback,
        OutcomeCategory::WrongContext,
        OutcomeCategory::Failed,
    ];
}

crate::simple_display! {
    OutcomeCategory {
        Ok => "ok",
        Crashed => "crashed",
        ScriptTraceback => "script_traceback",
        WrongContext => "wrong_context",
        Failed => "failed",
    }
}

/// Captured result of invoking one command against the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    pub command: CommandName,
    pub exit_code: i32,
    /// Decoded output with `\r\n` normalized to `\n`.
    pub output_text: String,
}

impl InvocationResult {
    pub fn new(command: CommandName, exit_code: i32, output_text: impl Into<String>) -> Self {
        Self { command, exit_code, output_text: output_text.into() }
    }

    /// Build a result from raw channel output.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; the host's output is
    /// data under test and must never abort the run.
    pub fn from_stdout(command: CommandName, exit_code: i32, stdout: &[u8]) -> Self {
        let output_text = String::from_utf8_lossy(stdout).replace("\r\n", "\n");
        Self { command, exit_code, output_text }
    }

    /// First line of the output, untrimmed.
    pub fn first_line(&self) -> &str {
        self.output_text.split('\n').next().unwrap_or_default()
    }

    pub fn classify(&self) -> OutcomeCategory {
        classify(self)
    }
}

/// Assign an outcome category to an invocation result.
pub fn classify(result: &InvocationResult) -> OutcomeCategory {
    if result.exit_code == 0 {
        return OutcomeCategory::Ok;
    }

    let script_path = format!("{}{}", SCRIPT_PATH, result.command);
    if result.output_text.contains(&script_path) {
        return OutcomeCategory::ScriptTraceback;
    }

    if result.output_text.starts_with(CRASH_SENTINEL) {
        return OutcomeCategory::Crashed;
    }

    let first_line = result.first_line();
    if first_line.trim().to_lowercase().contains("cursor") || first_line.contains(" UI") {
        return OutcomeCategory::WrongContext;
    }

    OutcomeCategory::Failed
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
