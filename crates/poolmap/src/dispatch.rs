//! Fan-out side of a call: channel setup, worker spawning and job feeding.

use crate::{
    Error, Operation, Result,
    job::{Job, Record},
    worker::worker_loop,
};
use core::num::NonZeroUsize;
use core::sync::atomic::AtomicBool;
use crossbeam_channel::{Receiver, bounded};
use std::thread::{self, Scope};

#[cfg(test)]
use core::cell::Cell;
#[cfg(test)]
use std::io;

#[cfg(test)]
thread_local! {
    /// Number of workers a `dispatch` running on this thread may start before
    /// spawning fails. `None` means unlimited.
    pub(crate) static SPAWN_LIMIT: Cell<Option<usize>> = const { Cell::new(None) };
}

#[cfg(test)]
fn check_spawn_limit(worker_id: usize) -> io::Result<()> {
    match SPAWN_LIMIT.with(Cell::get) {
        Some(limit) if worker_id >= limit => Err(io::Error::other("spawn limit reached")),
        _ => Ok(()),
    }
}

/// Spawns `workers` pool members inside `scope`, feeds every input to them and
/// closes the job channel.
///
/// Both channels are sized to the batch, so feeding never waits for a worker
/// and workers never wait for the collector. The returned receiver yields one
/// [`Record`] per input unless the pool aborted; it disconnects once every
/// worker has exited.
///
/// Workers in excess of the number of inputs find the job channel closed and
/// exit without doing anything.
///
/// # Errors
///
/// Returns [`Error::Spawn`] if a worker thread could not be started. Workers
/// spawned before the failure see the job channel close and exit.
pub(crate) fn dispatch<'scope, 'env, T, O>(
    scope: &'scope Scope<'scope, 'env>,
    inputs: Vec<T>,
    op: &'env O,
    workers: NonZeroUsize,
    abort: &'env AtomicBool,
) -> Result<Receiver<Record<O::Output, O::Error>>>
where
    T: Send + 'scope,
    O: Operation<T> + ?Sized,
{
    let total = inputs.len();
    let (job_tx, job_rx) = bounded(total);
    let (result_tx, result_rx) = bounded(total);

    for worker_id in 0..workers.get() {
        #[cfg(test)]
        check_spawn_limit(worker_id).map_err(|source| Error::Spawn { source })?;

        let jobs = job_rx.clone();
        let results = result_tx.clone();
        thread::Builder::new()
            .name(format!("poolmap-worker-{worker_id}"))
            .spawn_scoped(scope, move || {
                worker_loop(worker_id, jobs, results, op, abort);
            })
            .map_err(|source| Error::Spawn { source })?;
    }

    // Only the workers keep these ends alive. Once they are all gone the
    // collector sees a disconnect instead of waiting forever.
    drop(job_rx);
    drop(result_tx);

    for (index, input) in inputs.into_iter().enumerate() {
        if job_tx.send(Job { index, input }).is_err() {
            #[cfg(feature = "tracing")]
            tracing::debug!("Every worker exited, {} jobs left unfed", total - index);
            break;
        }
    }

    Ok(result_rx)
}
