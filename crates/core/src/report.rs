// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-category aggregation of invocation outputs.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{CommandName, InvocationResult, OutcomeCategory};

/// Finished report: category → command → raw output.
///
/// Categories serialize in a fixed order; commands keep the order in which
/// they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    buckets: BTreeMap<OutcomeCategory, IndexMap<CommandName, String>>,
}

impl Report {
    /// Commands recorded under `category`, with their output.
    pub fn bucket(&self, category: OutcomeCategory) -> Option<&IndexMap<CommandName, String>> {
        self.buckets.get(&category)
    }

    /// Category a command was recorded under, if any.
    pub fn category_of(&self, command: &str) -> Option<OutcomeCategory> {
        self.buckets
            .iter()
            .find(|(_, bucket)| bucket.contains_key(command))
            .map(|(category, _)| *category)
    }

    pub fn output_of(&self, command: &str) -> Option<&str> {
        self.buckets.values().find_map(|bucket| bucket.get(command)).map(String::as_str)
    }

    /// Total number of commands across all categories.
    pub fn len(&self) -> usize {
        self.buckets.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> Summary {
        let mut counts: BTreeMap<OutcomeCategory, usize> =
            OutcomeCategory::ALL.iter().map(|c| (*c, 0)).collect();
        for (category, bucket) in &self.buckets {
            counts.insert(*category, bucket.len());
        }
        Summary { counts }
    }

    pub fn iter(&self) -> impl Iterator<Item = (OutcomeCategory, &IndexMap<CommandName, String>)> {
        self.buckets.iter().map(|(c, b)| (*c, b))
    }
}

/// Count of commands per category, including empty categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary {
    counts: BTreeMap<OutcomeCategory, usize>,
}

impl Summary {
    pub fn count(&self, category: OutcomeCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OutcomeCategory, usize)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(c, n)| format!("{}: {}", c, n)).collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Incrementally builds a [`Report`] as invocations are classified.
#[derive(Debug, Default)]
pub struct ReportAggregator {
    report: Report,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command's output under `category`.
    ///
    /// Recording the same command again replaces the earlier entry, even when
    /// it was filed under a different category.
    pub fn record(&mut self, category: OutcomeCategory, command: CommandName, output: String) {
        for (existing, bucket) in self.report.buckets.iter_mut() {
            if *existing != category {
                bucket.shift_remove(command.as_str());
            }
        }
        self.report.buckets.retain(|_, bucket| !bucket.is_empty());
        self.report.buckets.entry(category).or_default().insert(command, output);
    }

    /// Classify and record an invocation result, returning its category.
    pub fn record_result(&mut self, result: InvocationResult) -> OutcomeCategory {
        let category = result.classify();
        self.record(category, result.command, result.output_text);
        category
    }

    pub fn summary(&self) -> Summary {
        self.report.summary()
    }

    /// In-progress view of the report.
    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn finalize(self) -> Report {
        self.report
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
