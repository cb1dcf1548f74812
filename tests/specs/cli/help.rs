// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and version output.

use crate::prelude::*;

#[test]
fn help_shows_usage_and_flags() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--dir")
        .stdout_has("--deny")
        .stdout_has("--settle-ms");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}
