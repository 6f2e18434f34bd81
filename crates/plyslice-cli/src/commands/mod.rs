//! Subcommand implementations.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

pub mod batch;
pub mod single;

/// Prompt the user for a path on stdin when none was supplied on the
/// command line.
pub(crate) fn prompt_for_path(title: &str) -> Result<PathBuf> {
    print!("{}: ", title.bold());
    std::io::stdout().flush().context("failed to flush prompt")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read path from stdin")?;

    let trimmed = line.trim();
    anyhow::ensure!(!trimmed.is_empty(), "no path given");

    Ok(PathBuf::from(trimmed))
}
