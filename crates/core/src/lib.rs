// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hf-core: Domain types and pure logic for the hackfuzz command exerciser

pub mod macros;

pub mod command;
pub mod listing;
pub mod outcome;
pub mod report;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use command::CommandName;
pub use listing::{parse_listing, ListingError, DEFAULT_DENYLIST, LIST_ARGS, PLUGINS_MARKER};
pub use outcome::{classify, InvocationResult, OutcomeCategory, CRASH_SENTINEL};
pub use report::{Report, ReportAggregator, Summary};
