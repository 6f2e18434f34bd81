//! plyslice single command - slice one scan file.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::commands::prompt_for_path;
use crate::{output, Cli, OutputFormat};

#[derive(Serialize)]
struct SingleInfo {
    scan: String,
    output: String,
}

pub fn run(
    scan: Option<&Path>,
    landmarks: Option<&Path>,
    out_dir: Option<&Path>,
    cli: &Cli,
) -> Result<()> {
    let scan_path = match scan {
        Some(path) => path.to_path_buf(),
        None => prompt_for_path("Scan file to slice")?,
    };

    let out_path = plyslice::slice_pipeline(&scan_path, landmarks, out_dir)?;

    let info = SingleInfo {
        scan: scan_path.display().to_string(),
        output: out_path.display().to_string(),
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&info, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                println!(
                    "{} {} {}",
                    "Sliced".green().bold(),
                    info.scan,
                    format!("-> {}", info.output).cyan()
                );
            }
        }
    }

    Ok(())
}
