//! plyslice: command-line utility for slicing PLY head scans at an
//! anatomically defined plane.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=plyslice=info` - Basic operation logging
//! - `RUST_LOG=plyslice=debug` - Detailed progress logging
//! - `RUST_LOG=plyslice::timing=debug` - Per-scan timing
//!
//! # Example
//!
//! ```bash
//! # Slice one scan, landmarks found beside it
//! plyslice single scans/subject01.ply
//!
//! # Batch process a directory tree with debug logging
//! RUST_LOG=plyslice=debug plyslice batch scans/ --recurse
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{batch, single};

/// plyslice - slice PLY head scans at a landmark-defined plane.
///
/// Derives a cutting plane from each scan's anatomical landmark table,
/// extracts the mesh/plane boundary contour, and writes it to CSV.
#[derive(Parser)]
#[command(name = "plyslice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Slice a single scan file and write its contour CSV
    Single {
        /// Input scan file (prompted for when omitted)
        scan: Option<PathBuf>,

        /// Landmark file path (default: scan path with a .txt extension)
        #[arg(long)]
        landmarks: Option<PathBuf>,

        /// Output directory (default: the scan's directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Batch process all scans in a directory
    Batch {
        /// Scan directory (prompted for when omitted)
        scan_dir: Option<PathBuf>,

        /// Recurse into subdirectories
        #[arg(long)]
        recurse: bool,

        /// Output directory (default: each scan's own directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "plyslice=info",
            2 => "plyslice=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    #[cfg(debug_assertions)]
    miette::set_panic_hook();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Single {
            scan,
            landmarks,
            out_dir,
        } => single::run(scan.as_deref(), landmarks.as_deref(), out_dir.as_deref(), &cli),
        Commands::Batch {
            scan_dir,
            recurse,
            out_dir,
        } => batch::run(scan_dir.as_deref(), *recurse, out_dir.as_deref(), &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            if let Some(slice_err) = e.downcast_ref::<plyslice::SliceError>() {
                eprintln!("{}: {}", "Error".red().bold(), slice_err);
                eprintln!("  {}: {}", "Code".cyan(), slice_err.code());
                for cause in e.chain().skip(1) {
                    eprintln!("  {}: {}", "Caused by".yellow(), cause);
                }
            } else {
                eprintln!("{}: {}", "Error".red().bold(), e);
                for cause in e.chain().skip(1) {
                    eprintln!("  {}: {}", "Caused by".yellow(), cause);
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
