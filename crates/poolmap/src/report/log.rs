use super::{Reporter, Summary};
use core::fmt;

/// Reports through `tracing` events.
///
/// - `debug` when the call starts,
/// - `warn` for every failed element,
/// - `info` with the elapsed time when the call ends.
///
/// The crate only emits events. Installing a subscriber is up to the
/// application.
#[derive(Debug, Clone, Copy)]
pub struct LogReporter {
    name: &'static str,
}

impl LogReporter {
    pub const fn new() -> Self {
        Self::named("poolmap")
    }

    /// Uses `name` to label the timing line of the call.
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LogReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for LogReporter {
    fn on_start(&mut self, total: usize, workers: usize) {
        tracing::debug!(call = self.name, total, workers, "Mapping started");
    }

    fn on_error(&mut self, index: usize, error: &dyn fmt::Display) {
        tracing::warn!(call = self.name, index, "Mapping error: {error}");
    }

    fn on_finish(&mut self, summary: &Summary) {
        tracing::info!(
            call = self.name,
            total = summary.total,
            completed = summary.completed,
            failed = summary.failed,
            workers = summary.workers,
            "{} took {:?}",
            self.name,
            summary.elapsed
        );
    }
}
