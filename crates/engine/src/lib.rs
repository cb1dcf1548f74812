// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hf-engine: Host supervision and the sequential fuzz loop.
//!
//! ```text
//! Session ─┬─ list_commands ──► ProcessSupervisor::invoke(["ls", "-a"])
//!          ├─ FuzzDriver::run ─► ProcessSupervisor::invoke([name]) ─► classify ─► Report
//!          └─ ProcessSupervisor::shutdown   (always, once)
//! ```

mod config;
mod driver;
mod enumerate;
mod error;
mod session;
mod supervisor;

pub use config::{SupervisorConfig, DEFAULT_SAVE_NAME, DEFAULT_SETTLE, DEFAULT_SHUTDOWN_GRACE};
pub use driver::FuzzDriver;
pub use enumerate::list_commands;
pub use error::EngineError;
pub use session::Session;
pub use supervisor::{ProcessSupervisor, MAX_START_ATTEMPTS, TIMED_OUT_EXIT_CODE, TIMED_OUT_MARKER};

#[cfg(test)]
mod test_helpers;
