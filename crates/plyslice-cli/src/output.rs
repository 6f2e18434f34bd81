//! Output helpers shared by the command runners.

use serde::Serialize;

use crate::OutputFormat;

/// Print a serializable result record in JSON mode. Text mode callers print
/// their own colored summaries, so this is a no-op there.
pub fn print<T: Serialize>(value: &T, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }

    if let OutputFormat::Json = format {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("failed to serialize output: {}", e),
        }
    }
}

/// Print a status line in text mode.
pub fn info(message: &str, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }

    if let OutputFormat::Text = format {
        println!("{}", message);
    }
}
