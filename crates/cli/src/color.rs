// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use hf_core::OutcomeCategory;
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: pastel cyan / steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Commands that exited cleanly
    pub const OK: u8 = 114;
    /// Host crashes
    pub const CRASHED: u8 = 203;
    /// Leaked script tracebacks
    pub const TRACEBACK: u8 = 221;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("{}{}{}", fg256(code), text, RESET)
    } else {
        text.to_string()
    }
}

/// Format text with the header color (steel blue).
pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

/// Format text with the context color (medium grey).
pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Format text in the color for an outcome category.
///
/// Crashes and tracebacks stand out; expected fuzzer noise stays grey.
pub fn category(category: OutcomeCategory, text: &str) -> String {
    let code = match category {
        OutcomeCategory::Ok => codes::OK,
        OutcomeCategory::Crashed => codes::CRASHED,
        OutcomeCategory::ScriptTraceback => codes::TRACEBACK,
        OutcomeCategory::WrongContext | OutcomeCategory::Failed => codes::CONTEXT,
    };
    paint(code, text)
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
