// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use hf_core::{Report, Summary};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write the report as pretty-printed JSON: category → command → output.
pub fn write_report(path: &Path, report: &Report) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("failed to write report to {}", path.display()))
}

/// Render the per-category counts.
pub fn format_summary(summary: &Summary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => {
            let width = summary.iter().map(|(c, _)| c.to_string().len()).max().unwrap_or(0);
            let mut out = crate::color::header("Summary:");
            for (category, count) in summary.iter() {
                let label = format!("{:<width$}", category.to_string());
                out.push_str(&format!("\n  {}  {}", crate::color::category(category, &label), count));
            }
            out.push_str(&format!(
                "\n  {}",
                crate::color::context(&format!("{} commands total", summary.total()))
            ));
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
    }
}

pub fn print_summary(summary: &Summary, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", format_summary(summary, format)?);
    Ok(())
}
