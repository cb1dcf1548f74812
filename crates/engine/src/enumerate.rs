// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use hf_adapters::{ControlChannel, HostLauncher};
use hf_core::{parse_listing, CommandName, LIST_ARGS};
use tracing::info;

use crate::{EngineError, ProcessSupervisor};

/// Ask the host for every invocable command, minus denylisted prefixes.
///
/// A listing without a `plugins:` section is an error: an empty result would
/// silently skip the whole run.
pub async fn list_commands<C, L, S>(
    supervisor: &mut ProcessSupervisor<C, L>,
    denylist: &[S],
) -> Result<Vec<CommandName>, EngineError>
where
    C: ControlChannel,
    L: HostLauncher,
    S: AsRef<str>,
{
    let listing = supervisor.invoke(&LIST_ARGS).await?;
    let commands = parse_listing(&listing.output_text, denylist)?;
    info!(count = commands.len(), "enumerated commands");
    Ok(commands)
}

#[cfg(test)]
#[path = "enumerate_tests.rs"]
mod tests;
