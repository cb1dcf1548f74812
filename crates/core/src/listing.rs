// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing of the host's `ls -a` command listing.
//!
//! The listing has a `plugins:` section followed by indented entries:
//!
//! ```text
//! plugins:
//!   reveal - Reveal the map.
//!     (continuation lines are double-indented)
//!   quickfort - Apply layout blueprints.
//! ```

use thiserror::Error;

use crate::CommandName;

/// Arguments sent to the control channel to list every command.
pub const LIST_ARGS: [&str; 2] = ["ls", "-a"];

/// Line introducing the section of invocable commands.
pub const PLUGINS_MARKER: &str = "plugins:";

/// Namespaces skipped by default: developer tools, and the visualizer which
/// starts a competing window.
pub const DEFAULT_DENYLIST: [&str; 3] = ["devel/", "ssense", "stonesense"];

const ENTRY_SEPARATOR: &str = " - ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("command listing has no `plugins:` section ({lines} lines of output)")]
    MissingMarker { lines: usize },
}

/// Extract command names from a listing, dropping denylisted prefixes.
///
/// Order follows the listing so repeated runs are comparable.
pub fn parse_listing<S: AsRef<str>>(
    text: &str,
    denylist: &[S],
) -> Result<Vec<CommandName>, ListingError> {
    let lines: Vec<&str> = text.split('\n').map(str::trim_end).collect();
    let start = lines
        .iter()
        .position(|line| *line == PLUGINS_MARKER)
        .ok_or(ListingError::MissingMarker { lines: lines.len() })?;

    let names = lines[start + 1..]
        .iter()
        .filter(|line| is_entry(line))
        .filter_map(|line| {
            let name = line.split(ENTRY_SEPARATOR).next().unwrap_or_default().trim();
            (!name.is_empty()).then(|| CommandName::new(name))
        })
        .filter(|name| !denylist.iter().any(|prefix| name.has_prefix(prefix.as_ref())))
        .collect();

    Ok(names)
}

/// Single-indented lines are entries; deeper indentation is a continuation.
fn is_entry(line: &str) -> bool {
    line.starts_with("  ") && line.as_bytes().get(2).is_some_and(|b| *b != b' ')
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
