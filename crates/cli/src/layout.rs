// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating a game installation and its two executables.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default pattern for installation directories next to the harness.
pub const DEFAULT_PATTERN: &str = "Dwarf Fortress 0.??.??";

#[cfg(windows)]
pub const HOST_EXE: &str = "Dwarf Fortress.exe";
#[cfg(windows)]
pub const RUN_EXE: &str = "dfhack-run.exe";

#[cfg(not(windows))]
pub const HOST_EXE: &str = "dfhack";
#[cfg(not(windows))]
pub const RUN_EXE: &str = "dfhack-run";

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid installation pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no installation directory matching '{pattern}' in {}", .base.display())]
    NoMatch { pattern: String, base: PathBuf },

    #[error("installation directory not found: {}", .0.display())]
    MissingDir(PathBuf),

    #[error("{name} not found in {}", .dir.display())]
    MissingExecutable { name: &'static str, dir: PathBuf },
}

/// A resolved installation with both executables present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    pub dir: PathBuf,
    pub host_exe: PathBuf,
    pub run_exe: PathBuf,
}

impl InstallLayout {
    /// Validate an explicitly given installation directory.
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self, LayoutError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(LayoutError::MissingDir(dir));
        }
        let host_exe = require(&dir, HOST_EXE)?;
        let run_exe = require(&dir, RUN_EXE)?;
        Ok(Self { dir, host_exe, run_exe })
    }

    /// First directory under `base` matching `pattern`, in sorted order.
    pub fn find(base: &Path, pattern: &str) -> Result<Self, LayoutError> {
        let full = format!("{}/{}", glob::Pattern::escape(&base.to_string_lossy()), pattern);
        let paths = glob::glob(&full)
            .map_err(|source| LayoutError::Pattern { pattern: pattern.to_string(), source })?;

        let mut dirs: Vec<PathBuf> = paths.filter_map(Result::ok).filter(|p| p.is_dir()).collect();
        dirs.sort();

        match dirs.into_iter().next() {
            Some(dir) => Self::at(dir),
            None => Err(LayoutError::NoMatch {
                pattern: pattern.to_string(),
                base: base.to_path_buf(),
            }),
        }
    }

    /// Explicit directory wins; otherwise search `base` for `pattern`.
    pub fn resolve(dir: Option<&Path>, base: &Path, pattern: &str) -> Result<Self, LayoutError> {
        match dir {
            Some(dir) => Self::at(dir),
            None => Self::find(base, pattern),
        }
    }
}

fn require(dir: &Path, name: &'static str) -> Result<PathBuf, LayoutError> {
    let path = dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(LayoutError::MissingExecutable { name, dir: dir.to_path_buf() })
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
