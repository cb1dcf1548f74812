// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O: the host process and its control channel.

pub mod channel;
pub mod host;

pub use channel::{ChannelError, ChannelReply, ControlChannel, DfhackRunChannel};
pub use host::{HostLauncher, HostProcess, LaunchError, LaunchSpec, LocalHostLauncher};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use channel::{ChannelCall, FakeControlChannel};
#[cfg(any(test, feature = "test-support"))]
pub use host::{FakeHostLauncher, FakeHostProcess};

#[cfg(all(test, unix))]
mod test_scripts;
