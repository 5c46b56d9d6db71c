//! Progress, diagnostics and timing for a [`map`](crate::map) call.
//!
//! The pool never prints anything itself. Everything a caller may want to see
//! while a batch runs goes through a [`Reporter`], which is driven from the
//! collecting thread only: implementations do not need to be `Sync` and can
//! keep plain mutable state.
//!
//! ## Bundled reporters
//!
//! - [`NoopReporter`]: ignores everything. Used whenever a call is `silent`.
//! - [`LogReporter`] (feature `tracing`): emits `tracing` events for errors
//!   and for the start and end of the call.
//! - [`ProgressReporter`] (feature `progress`): draws an `indicatif` progress
//!   bar on stderr. [`WithProgress`] pairs it with a reporter that also
//!   writes to the terminal and pauses the bar while that reporter prints.
//!
//! Reporters compose: a tuple `(A, B)` forwards every call to `A` then `B`.
//! [`default_reporter`] builds the combination used by [`map`](crate::map).

#[cfg(feature = "tracing")]
mod log;
#[cfg(feature = "progress")]
mod progress;

#[cfg(feature = "tracing")]
pub use log::LogReporter;
#[cfg(feature = "progress")]
pub use progress::{ProgressReporter, WithProgress};

use core::fmt;
use core::time::Duration;

/// Totals handed to [`Reporter::on_finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of input elements.
    pub total: usize,
    /// Elements whose result was collected. Lower than `total` only when the
    /// call was aborted.
    pub completed: usize,
    /// Collected elements whose operation returned an error.
    pub failed: usize,
    /// Size of the worker pool.
    pub workers: usize,
    /// Wall-clock time of the whole call.
    pub elapsed: Duration,
}

/// Observer of a running [`map`](crate::map) call.
///
/// Every method has an empty default so implementations only override what
/// they care about. None of these calls can influence the mapped data.
pub trait Reporter {
    /// The call is about to process `total` elements on `workers` threads.
    fn on_start(&mut self, _total: usize, _workers: usize) {}

    /// The result of element `index` was collected.
    fn on_item(&mut self, _index: usize) {}

    /// The operation failed for element `index`. Called before
    /// [`on_item`](Reporter::on_item) for the same element.
    fn on_error(&mut self, _index: usize, _error: &dyn fmt::Display) {}

    /// The call is over, successfully or not.
    fn on_finish(&mut self, _summary: &Summary) {}
}

/// A reporter that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn on_start(&mut self, total: usize, workers: usize) {
        (**self).on_start(total, workers);
    }

    fn on_item(&mut self, index: usize) {
        (**self).on_item(index);
    }

    fn on_error(&mut self, index: usize, error: &dyn fmt::Display) {
        (**self).on_error(index, error);
    }

    fn on_finish(&mut self, summary: &Summary) {
        (**self).on_finish(summary);
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn on_start(&mut self, total: usize, workers: usize) {
        (**self).on_start(total, workers);
    }

    fn on_item(&mut self, index: usize) {
        (**self).on_item(index);
    }

    fn on_error(&mut self, index: usize, error: &dyn fmt::Display) {
        (**self).on_error(index, error);
    }

    fn on_finish(&mut self, summary: &Summary) {
        (**self).on_finish(summary);
    }
}

impl<A: Reporter, B: Reporter> Reporter for (A, B) {
    fn on_start(&mut self, total: usize, workers: usize) {
        self.0.on_start(total, workers);
        self.1.on_start(total, workers);
    }

    fn on_item(&mut self, index: usize) {
        self.0.on_item(index);
        self.1.on_item(index);
    }

    fn on_error(&mut self, index: usize, error: &dyn fmt::Display) {
        self.0.on_error(index, error);
        self.1.on_error(index, error);
    }

    fn on_finish(&mut self, summary: &Summary) {
        self.0.on_finish(summary);
        self.1.on_finish(summary);
    }
}

/// The reporter used by a non-silent [`map`](crate::map) call.
///
/// A progress bar when the `progress` feature is enabled, `tracing` events
/// when the `tracing` feature is enabled, both when both are (the bar is
/// paused while an event is logged), and a
/// [`NoopReporter`] otherwise.
pub fn default_reporter() -> Box<dyn Reporter> {
    #[cfg(all(feature = "progress", feature = "tracing"))]
    let reporter: Box<dyn Reporter> =
        Box::new(WithProgress::new(ProgressReporter::new(), LogReporter::new()));

    #[cfg(all(feature = "progress", not(feature = "tracing")))]
    let reporter: Box<dyn Reporter> = Box::new(ProgressReporter::new());

    #[cfg(all(not(feature = "progress"), feature = "tracing"))]
    let reporter: Box<dyn Reporter> = Box::new(LogReporter::new());

    #[cfg(not(any(feature = "progress", feature = "tracing")))]
    let reporter: Box<dyn Reporter> = Box::new(NoopReporter);

    reporter
}
