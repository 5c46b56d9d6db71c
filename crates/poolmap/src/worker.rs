use crate::{
    Operation,
    job::{Job, Outcome, Record},
};
use core::sync::atomic::{AtomicBool, Ordering};
use crossbeam_channel::{Receiver, Sender};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Body of a pool member.
///
/// Takes jobs until the job channel is closed and drained, applies `op` to each
/// one and sends the outcome back tagged with the job's original index.
///
/// A panic inside `op` is caught and forwarded as [`Outcome::Panicked`]. The
/// worker then raises `abort` and exits; every other worker checks `abort`
/// before taking its next job, so the pool winds down instead of processing
/// the rest of a batch that is going to be discarded.
///
/// # Arguments
///
/// - `worker_id`: Index of this worker inside the pool (used for tracing).
/// - `jobs`: Shared receiving end of the job channel.
/// - `results`: Shared sending end of the result channel.
/// - `op`: The operation, borrowed from the caller.
/// - `abort`: Raised by the first worker whose operation panicked.
pub(crate) fn worker_loop<T, O>(
    worker_id: usize,
    jobs: Receiver<Job<T>>,
    results: Sender<Record<O::Output, O::Error>>,
    op: &O,
    abort: &AtomicBool,
) where
    O: Operation<T> + ?Sized,
{
    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {worker_id} started");

    #[cfg(not(feature = "tracing"))]
    let _ = worker_id;

    while !abort.load(Ordering::Acquire) {
        let Ok(Job { index, input }) = jobs.recv() else {
            break;
        };

        // The batch is abandoned as soon as an operation unwinds, so no state
        // observed after the panic is ever returned to the caller.
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| op.apply(input))) {
            Ok(result) => Outcome::Done(result),
            Err(payload) => {
                abort.store(true, Ordering::Release);
                let message = panic_message(payload.as_ref());
                #[cfg(feature = "tracing")]
                tracing::error!("Worker {worker_id} caught a panic on element {index}: {message}");
                Outcome::Panicked(message)
            }
        };
        let panicked = matches!(outcome, Outcome::Panicked(_));

        if results.send(Record { index, outcome }).is_err() {
            #[cfg(feature = "tracing")]
            tracing::debug!("Worker {worker_id} found the result channel closed");
            break;
        }
        if panicked {
            break;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {worker_id} stopped");
}

/// Extracts the message of a panic payload raised by `panic!`.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    type Op<'a> = &'a (dyn Fn(i32) -> Result<i32, String> + Sync);

    fn run_single_worker(inputs: Vec<i32>, op: Op<'_>) -> Vec<Record<i32, String>> {
        let (job_tx, job_rx) = unbounded();
        let (result_tx, result_rx) = unbounded();
        let abort = AtomicBool::new(false);

        for (index, input) in inputs.into_iter().enumerate() {
            job_tx.send(Job { index, input }).unwrap();
        }
        drop(job_tx);

        worker_loop(0, job_rx, result_tx, &op, &abort);
        result_rx.try_iter().collect()
    }

    #[test]
    fn processes_jobs_in_channel_order() {
        let records = run_single_worker(vec![3, 1, 2], &|x| Ok(x * 10));

        let indices: Vec<_> = records.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        let values: Vec<_> = records
            .into_iter()
            .map(|r| match r.outcome {
                Outcome::Done(Ok(v)) => v,
                other => panic!("unexpected outcome {other:?}"),
            })
            .collect();
        assert_eq!(values, vec![30, 10, 20]);
    }

    #[test]
    fn operation_errors_do_not_stop_the_worker() {
        let records = run_single_worker(vec![1, 2, 3], &|x| {
            if x == 2 { Err("two".to_string()) } else { Ok(x) }
        });

        assert_eq!(records.len(), 3);
        assert!(matches!(&records[1].outcome, Outcome::Done(Err(e)) if e == "two"));
    }

    #[test]
    fn panic_is_reported_and_stops_the_worker() {
        let records = run_single_worker(vec![1, 2, 3], &|x| {
            if x == 2 {
                panic!("bad element {x}");
            }
            Ok(x)
        });

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].index, 1);
        assert!(matches!(&records[1].outcome, Outcome::Panicked(m) if m == "bad element 2"));
    }

    #[test]
    fn raised_abort_flag_prevents_new_jobs() {
        let (job_tx, job_rx) = unbounded();
        let (result_tx, result_rx) = unbounded::<Record<i32, String>>();
        let abort = AtomicBool::new(true);
        job_tx.send(Job { index: 0, input: 1 }).unwrap();

        let op = |x: i32| -> Result<i32, String> { Ok(x) };
        worker_loop(0, job_rx, result_tx, &op, &abort);

        assert!(result_rx.try_recv().is_err());
    }

    #[test]
    fn panic_message_handles_both_payload_kinds() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }
}
