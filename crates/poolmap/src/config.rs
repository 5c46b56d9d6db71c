use crate::{Error, Result};
use core::num::NonZeroUsize;

/// Per-call configuration for [`map`](crate::map).
///
/// `workers` bounds how many elements are processed at the same time. `silent`
/// turns every reporter call into a no-op; it never changes the returned data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapConfig {
    /// Number of worker threads in the pool. Must be at least 1.
    pub workers: usize,
    /// Suppress progress, diagnostics and timing reports.
    pub silent: bool,
}

impl MapConfig {
    /// Creates a non-silent configuration with `workers` threads.
    pub const fn new(workers: usize) -> Self {
        Self {
            workers,
            silent: false,
        }
    }

    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub const fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Returns the worker count if it is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerCount`] when `workers` is zero.
    pub fn validate(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.workers).ok_or(Error::InvalidWorkerCount {
            workers: self.workers,
        })
    }
}

impl Default for MapConfig {
    /// One worker per logical CPU, not silent.
    fn default() -> Self {
        Self::new(num_cpus::get().max(1))
    }
}
