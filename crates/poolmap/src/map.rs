use crate::{
    MapConfig, Mapped, Operation, Result,
    collect::Collector,
    dispatch::dispatch,
    report::{NoopReporter, Reporter, Summary, default_reporter},
};
use core::num::NonZeroUsize;
use core::sync::atomic::AtomicBool;
use std::thread;
use std::time::Instant;

/// Applies `op` to every element of `inputs` on a pool of `config.workers`
/// threads.
///
/// Returns once every element has been processed. Slot `i` of the returned
/// [`Mapped`] always belongs to `inputs[i]`, whatever order the workers
/// finished in. Per-element failures are stored in
/// [`Mapped::errors`]; they never abort the batch.
///
/// Unless `config.silent` is set, progress and diagnostics go to
/// [`default_reporter`].
///
/// # Errors
///
/// - [`Error::InvalidWorkerCount`](crate::Error::InvalidWorkerCount) when
///   `config.workers` is zero, before any work is done.
/// - [`Error::OperationPanicked`](crate::Error::OperationPanicked) when `op`
///   panics. The pool stops taking new jobs and no partial result is
///   returned.
/// - [`Error::Spawn`](crate::Error::Spawn) when the OS refuses a thread.
///
/// # Example
///
/// ```
/// use poolmap::{MapConfig, map};
///
/// let config = MapConfig::new(2).with_silent(true);
/// let mapped = map(
///     vec![1, 2, 3, 4],
///     |x: i32| if x % 2 == 0 { Ok(x * 2) } else { Err("odd") },
///     &config,
/// )
/// .unwrap();
///
/// assert_eq!(mapped.outputs(), &[None, Some(4), None, Some(8)]);
/// assert_eq!(mapped.errors(), &[Some("odd"), None, Some("odd"), None]);
/// ```
pub fn map<T, O>(inputs: Vec<T>, op: O, config: &MapConfig) -> Result<Mapped<O::Output, O::Error>>
where
    T: Send,
    O: Operation<T>,
{
    if config.silent {
        map_with_reporter(inputs, op, config, &mut NoopReporter)
    } else {
        map_with_reporter(inputs, op, config, &mut default_reporter())
    }
}

/// Same as [`map`], reporting to `reporter` instead of the default one.
///
/// A silent `config` still wins: `reporter` is then never called.
///
/// # Errors
///
/// See [`map`].
pub fn map_with_reporter<T, O, P>(
    inputs: Vec<T>,
    op: O,
    config: &MapConfig,
    reporter: &mut P,
) -> Result<Mapped<O::Output, O::Error>>
where
    T: Send,
    O: Operation<T>,
    P: Reporter + ?Sized,
{
    let workers = config.validate()?;

    if config.silent {
        run(inputs, &op, workers, &mut NoopReporter)
    } else {
        run(inputs, &op, workers, reporter)
    }
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(total = inputs.len(), workers = workers.get()))
)]
fn run<T, O, P>(
    inputs: Vec<T>,
    op: &O,
    workers: NonZeroUsize,
    reporter: &mut P,
) -> Result<Mapped<O::Output, O::Error>>
where
    T: Send,
    O: Operation<T>,
    P: Reporter + ?Sized,
{
    let start = Instant::now();
    let total = inputs.len();
    reporter.on_start(total, workers.get());

    let mut collector = Collector::new(total);
    let collected = if total == 0 {
        Ok(())
    } else {
        let abort = AtomicBool::new(false);
        thread::scope(|scope| {
            let results = dispatch(scope, inputs, op, workers, &abort)?;
            collector.collect(&results, reporter)
        })
    };

    reporter.on_finish(&Summary {
        total,
        completed: collector.received(),
        failed: collector.failed(),
        workers: workers.get(),
        elapsed: start.elapsed(),
    });

    collected?;
    collector.finish()
}
