// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::CommandName;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for invocation results and command lists.
pub mod strategies {
    use crate::{CommandName, InvocationResult, CRASH_SENTINEL};
    use proptest::prelude::*;

    pub fn arb_command_name() -> impl Strategy<Value = CommandName> {
        "[a-z]{1,8}(/[a-z\\-]{1,8})?".prop_map(CommandName::new)
    }

    /// Output text biased toward the signals the classifier looks for.
    pub fn arb_output() -> impl Strategy<Value = String> {
        prop_oneof![
            ".*",
            Just(CRASH_SENTINEL.to_string()),
            ".*".prop_map(|tail| format!("{}{}", CRASH_SENTINEL, tail)),
            ".*".prop_map(|tail| format!("Error: bad UI{}", tail)),
            ".*".prop_map(|tail| format!("Cursor required\n{}", tail)),
        ]
    }

    pub fn arb_invocation() -> impl Strategy<Value = InvocationResult> {
        (arb_command_name(), -2i32..4, arb_output())
            .prop_map(|(command, exit_code, output)| InvocationResult::new(command, exit_code, output))
    }

    /// Duplicate-free command list, in generation order.
    pub fn arb_command_list() -> impl Strategy<Value = Vec<CommandName>> {
        proptest::collection::btree_set(arb_command_name(), 0..24)
            .prop_map(|set| set.into_iter().collect())
    }
}

/// Build a command list from string literals.
pub fn commands(names: &[&str]) -> Vec<CommandName> {
    names.iter().map(|n| CommandName::new(*n)).collect()
}

/// A minimal `ls -a` listing containing the given command lines.
pub fn listing(lines: &[&str]) -> String {
    let mut out = String::from("builtin:\n  ls - list commands\n\nplugins:\n");
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
