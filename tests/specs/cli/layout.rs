// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installation lookup failures exit with the setup code.

use crate::prelude::*;

#[test]
fn missing_install_dir_exits_2() {
    let tmp = TempDir::new().unwrap();
    cli()
        .current_dir(tmp.path())
        .arg("--dir")
        .arg(tmp.path().join("nowhere"))
        .fails_with(2)
        .stderr_has("installation directory not found");
}

#[test]
fn no_pattern_match_exits_2() {
    let tmp = TempDir::new().unwrap();
    cli()
        .current_dir(tmp.path())
        .fails_with(2)
        .stderr_has("no installation directory matching");
}

#[test]
fn install_without_executables_exits_2() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir(tmp.path().join("Dwarf Fortress 0.47.05")).unwrap();

    cli().current_dir(tmp.path()).fails_with(2).stderr_has("not found in");
}

#[test]
fn no_report_written_on_setup_error() {
    let tmp = TempDir::new().unwrap();
    cli().current_dir(tmp.path()).fails_with(2);
    assert!(!tmp.path().join("fuzz_report.json").exists());
}
