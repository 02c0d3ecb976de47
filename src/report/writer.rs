//! Grouped quote JSON output.
//!
//! The output is a pretty-printed JSON object keyed by author. It carries
//! no timestamps or run metadata, so writing the same groups twice yields
//! byte-identical files.

use crate::models::GroupedQuotes;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Whether the output file was new or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
}

/// Generate the JSON document for grouped quotes.
pub fn generate_json(grouped: &GroupedQuotes) -> Result<String> {
    serde_json::to_string_pretty(grouped).map_err(Into::into)
}

/// Write grouped quotes to `path`, replacing any existing file.
pub fn write_grouped_quotes(grouped: &GroupedQuotes, path: &Path) -> Result<WriteOutcome> {
    let outcome = if path.exists() {
        warn!("Output file already exists. Overwriting existing file.");
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Created
    };

    let content = generate_json(grouped)?;
    debug!("Writing {} bytes to {}", content.len(), path.display());

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write grouped quotes to {}", path.display()))?;

    Ok(outcome)
}
