// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full runs against shell-script stand-ins for the game and `dfhack-run`.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use serial_test::serial;
use similar_asserts::assert_eq;

use crate::prelude::*;

const SENTINEL: &str = "In call to ::RunCommand: I/O error in receive header.";

const HOST: &str = r#"#!/bin/sh
echo $$ > host.pid
echo launched >> launches.log
exec sleep 30
"#;

const RUN: &str = r#"#!/bin/sh
echo "$*" >> calls.log
case "$1" in
  ls)
    printf 'builtin:\n  ls - List commands.\n\nplugins:\n'
    printf '  devel/dump - Developer tool.\n'
    printf '  reveal - Reveal the map.\n'
    printf '    Continuation of the reveal help.\n'
    printf '  quickfort - Apply blueprints.\n'
    printf '  gui/foo - A screen.\n'
    printf '  crashy - Crashes the game.\n'
    printf '  stonesense - Visualizer.\n'
    printf '  prospect - Find ores.\n'
    ;;
  load-save) exit 0 ;;
  reveal) exit 0 ;;
  quickfort)
    printf 'hack/scripts/quickfort.lua:12: error\n/hack/scripts/quickfort.lua:40: in main\n'
    exit 1
    ;;
  gui/foo)
    echo "Error: invalid UI state"
    exit 1
    ;;
  crashy)
    kill "$(cat host.pid)"
    echo "In call to ::RunCommand: I/O error in receive header."
    exit 1
    ;;
  prospect)
    echo "No ores here"
    exit 2
    ;;
  die)
    kill "$(cat host.pid)"
    ;;
esac
exit 0
"#;

fn script(path: &Path, body: &str) {
    std::fs::write(path, body).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Installation directory named to match the default pattern.
fn fake_install(base: &Path) -> PathBuf {
    let dir = base.join("Dwarf Fortress 0.47.05");
    std::fs::create_dir(&dir).unwrap();
    script(&dir.join("dfhack"), HOST);
    script(&dir.join("dfhack-run"), RUN);
    dir
}

fn calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls.log")).unwrap().lines().map(str::to_string).collect()
}

fn launches(dir: &Path) -> usize {
    std::fs::read_to_string(dir.join("launches.log")).unwrap().lines().count()
}

fn report(base: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(base.join("fuzz_report.json")).unwrap()).unwrap()
}

#[test]
#[serial]
fn run_classifies_every_command_and_writes_report() {
    let tmp = TempDir::new().unwrap();
    let dir = fake_install(tmp.path());

    cli()
        .current_dir(tmp.path())
        .args(&["--settle-ms", "0"])
        .passes()
        .stdout_has("Summary:")
        .stdout_has("5 commands total");

    let report = report(tmp.path());
    assert_eq!(report["ok"]["reveal"], "");
    assert!(report["script_traceback"]["quickfort"]
        .as_str()
        .unwrap()
        .contains("/hack/scripts/quickfort.lua:40"));
    assert_eq!(report["wrong_context"]["gui/foo"], "Error: invalid UI state\n");
    assert!(report["crashed"]["crashy"].as_str().unwrap().starts_with(SENTINEL));
    assert_eq!(report["failed"]["prospect"], "No ores here\n");

    assert_eq!(
        calls(&dir),
        vec!["ls -a", "reveal", "quickfort", "gui/foo", "crashy", "prospect", "die"]
    );
    assert_eq!(launches(&dir), 2, "host should be relaunched after the crash");
}

#[test]
#[serial]
fn crash_on_last_command_skips_die() {
    let tmp = TempDir::new().unwrap();
    let dir = fake_install(tmp.path());
    std::fs::create_dir_all(dir.join("data/save/fort")).unwrap();

    cli()
        .current_dir(tmp.path())
        .args(&["--settle-ms", "0", "--save", "fort", "--deny", "prospect"])
        .passes();

    assert_eq!(
        calls(&dir),
        vec![
            "load-save fort",
            "ls -a",
            "reveal",
            "quickfort",
            "gui/foo",
            "crashy",
        ]
    );
    assert_eq!(launches(&dir), 1, "no command followed the crash");
}

#[test]
#[serial]
fn deny_and_output_flags() {
    let tmp = TempDir::new().unwrap();
    let dir = fake_install(tmp.path());
    let out = tmp.path().join("custom.json");

    cli()
        .current_dir(tmp.path())
        .args(&["--settle-ms", "0", "--deny", "crashy", "--deny", "gui/", "--format", "json"])
        .arg("--dir")
        .arg(&dir)
        .arg("--output")
        .arg(&out)
        .passes()
        .stdout_has("\"crashed\": 0");

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert!(value.get("crashed").is_none());
    assert!(value.get("wrong_context").is_none());
    assert!(!calls(&dir).iter().any(|c| c == "crashy" || c == "gui/foo"));
    assert_eq!(launches(&dir), 1);
}

#[test]
#[serial]
fn settle_from_environment_is_honored() {
    let tmp = TempDir::new().unwrap();
    let dir = fake_install(tmp.path());
    std::fs::create_dir_all(dir.join("data/save/region1")).unwrap();

    cli()
        .current_dir(tmp.path())
        .env("HACKFUZZ_SETTLE_MS", "0")
        .args(&["--deny", "crashy"])
        .passes()
        .stdout_has("4 commands total");

    assert_eq!(calls(&dir).first().map(String::as_str), Some("load-save region1"));
}

#[test]
#[serial]
fn missing_listing_marker_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let dir = fake_install(tmp.path());
    script(&dir.join("dfhack-run"), "#!/bin/sh\necho \"$*\" >> calls.log\necho nothing here\n");

    cli()
        .current_dir(tmp.path())
        .args(&["--settle-ms", "0"])
        .fails_with(1)
        .stderr_has("plugins:");

    assert!(!tmp.path().join("fuzz_report.json").exists());
    assert_eq!(calls(&dir).last().map(String::as_str), Some("die"));
}
