// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::time::Duration;

/// Settle wait after loading a save, overriding the built-in default.
pub fn settle_override() -> Option<Duration> {
    duration_ms("HACKFUZZ_SETTLE_MS")
}

/// Per-call timeout for `dfhack-run`. Unbounded when unset.
pub fn channel_timeout() -> Option<Duration> {
    duration_ms("HACKFUZZ_CHANNEL_TIMEOUT_MS").filter(|d| !d.is_zero())
}

/// Log filter directive: HACKFUZZ_LOG > RUST_LOG > "info"
pub fn log_filter() -> String {
    std::env::var("HACKFUZZ_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "info".to_string())
}

fn duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
