//! plyslice batch command - slice every scan under a directory.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use plyslice::BatchParams;
use serde::Serialize;

use crate::commands::prompt_for_path;
use crate::{output, Cli, OutputFormat};

#[derive(Serialize)]
struct BatchInfo {
    scan_dir: String,
    total: usize,
    sliced: usize,
    failures: Vec<FailureInfo>,
}

#[derive(Serialize)]
struct FailureInfo {
    scan: String,
    code: String,
    error: String,
}

pub fn run(
    scan_dir: Option<&Path>,
    recurse: bool,
    out_dir: Option<&Path>,
    cli: &Cli,
) -> Result<()> {
    let scan_dir = match scan_dir {
        Some(path) => path.to_path_buf(),
        None => prompt_for_path("Scan directory for batch processing")?,
    };

    let params = BatchParams {
        recurse,
        ..BatchParams::default()
    };

    if !cli.quiet {
        output::info("Slicing scans...", cli.format, cli.quiet);
    }

    let report = plyslice::batch_slice_pipeline(&scan_dir, out_dir, &params)?;

    let info = BatchInfo {
        scan_dir: scan_dir.display().to_string(),
        total: report.total,
        sliced: report.sliced,
        failures: report
            .failures
            .iter()
            .map(|(path, err)| FailureInfo {
                scan: path.display().to_string(),
                code: err.code().to_string(),
                error: err.to_string(),
            })
            .collect(),
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&info, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                let summary = format!("Sliced {} of {} scan files", info.sliced, info.total);
                if report.all_succeeded() {
                    println!("{}", summary.green().bold());
                } else {
                    println!("{}", summary.yellow().bold());
                    for failure in &info.failures {
                        println!(
                            "  {} {} ({}): {}",
                            "skipped".yellow(),
                            failure.scan,
                            failure.code,
                            failure.error
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
