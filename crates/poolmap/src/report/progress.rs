use super::{Reporter, Summary};
use core::fmt;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "{elapsed_precise} [{wide_bar}] {pos}/{len} {msg}";

/// Draws an `indicatif` progress bar advancing once per collected element.
///
/// The bar is created when the call starts, since only then is the batch size
/// known, and it renders on stderr only when stderr is a terminal. The bar's
/// message tracks how many elements failed so far.
#[derive(Default)]
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    hidden: bool,
    failed: usize,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that tracks progress without drawing anything.
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::default()
        }
    }

    /// Runs `f` with the bar cleared from the terminal, redrawing it after.
    ///
    /// Anything printed to stderr inside `f` lands above the bar instead of
    /// splitting its line.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match &self.bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }
}

/// A [`ProgressReporter`] combined with another reporter that writes to the
/// terminal, such as `LogReporter`.
///
/// The bar is paused while `inner` handles the start of the call and every
/// error, so the lines it emits never tear the bar.
pub struct WithProgress<R> {
    progress: ProgressReporter,
    inner: R,
}

impl<R: Reporter> WithProgress<R> {
    pub fn new(progress: ProgressReporter, inner: R) -> Self {
        Self { progress, inner }
    }
}

impl<R: Reporter> Reporter for WithProgress<R> {
    fn on_start(&mut self, total: usize, workers: usize) {
        self.progress.on_start(total, workers);
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.on_start(total, workers));
    }

    fn on_item(&mut self, index: usize) {
        self.progress.on_item(index);
        // Not suspended: redrawing once per element flickers.
        self.inner.on_item(index);
    }

    fn on_error(&mut self, index: usize, error: &dyn fmt::Display) {
        self.progress.on_error(index, error);
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.on_error(index, error));
    }

    fn on_finish(&mut self, summary: &Summary) {
        // The bar is finished first, so `inner` prints below it.
        self.progress.on_finish(summary);
        self.inner.on_finish(summary);
    }
}

impl Reporter for ProgressReporter {
    fn on_start(&mut self, total: usize, _workers: usize) {
        let target = if self.hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };
        let bar = ProgressBar::with_draw_target(Some(total as u64), target);
        bar.set_style(
            ProgressStyle::with_template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        self.failed = 0;
        self.bar = Some(bar);
    }

    fn on_item(&mut self, _index: usize) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn on_error(&mut self, _index: usize, _error: &dyn fmt::Display) {
        self.failed += 1;
        if let Some(bar) = &self.bar {
            bar.set_message(format!("{} failed", self.failed));
        }
    }

    fn on_finish(&mut self, summary: &Summary) {
        if let Some(bar) = self.bar.take() {
            if summary.completed == summary.total {
                bar.finish();
            } else {
                bar.abandon();
            }
        }
    }
}
