//! Shared helper functions for CLI commands

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::persist;
use crate::core::workspace::Workspace;

/// Resolve the data file path from `--file` or the per-user default
pub fn data_path(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(path) = &global.file {
        return Ok(path.clone());
    }
    persist::default_data_path()
        .ok_or_else(|| miette::miette!("could not determine a data directory; pass --file"))
}

/// Open the workspace behind the resolved data path
pub fn open_workspace(global: &GlobalOpts) -> Result<Workspace> {
    let path = data_path(global)?;
    Workspace::open(&path).into_diagnostic()
}

/// Format a monetary amount with the two-decimal display convention
pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
