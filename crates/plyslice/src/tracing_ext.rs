//! Structured timing for pipeline runs.
//!
//! Set `RUST_LOG=plyslice::timing=debug` to see per-scan timing.

use std::time::Instant;

use tracing::{debug, info};

/// A performance timer that logs its duration on drop.
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
}

impl OperationTimer {
    /// Create a new operation timer.
    pub fn new(name: &'static str) -> Self {
        debug!(target: "plyslice::timing", operation = name, "Starting operation");
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Get the elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        info!(
            target: "plyslice::timing",
            operation = self.name,
            elapsed_ms = format!("{:.2}", self.elapsed_ms()),
            "Operation completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_is_monotonic() {
        let timer = OperationTimer::new("test");
        let first = timer.elapsed_ms();
        let second = timer.elapsed_ms();
        assert!(second >= first);
        assert!(first >= 0.0);
    }
}
