// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use hf_adapters::{ChannelError, LaunchError};
use hf_core::ListingError;
use thiserror::Error;

/// Harness failures. Failures of the commands under test are never errors;
/// they are recorded in the report.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error(transparent)]
    Channel(#[from] ChannelError),
    #[error("host died while loading the save on {attempts} consecutive launches")]
    HostUnstable { attempts: u32 },
    #[error("cannot enumerate commands: {0}")]
    Listing(#[from] ListingError),
}
