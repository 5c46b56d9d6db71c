use crate::{
    Error, Mapped, Result,
    job::{Outcome, Record},
    report::Reporter,
};
use core::fmt;
use crossbeam_channel::Receiver;

/// Fan-in side of a call: drains result records and places each one in the
/// slot of its original index.
///
/// Records arrive in completion order. The collector returns once it has seen
/// one record per input element, which is what makes a call look synchronous
/// to its caller.
pub(crate) struct Collector<R, E> {
    slots: Vec<Option<Result<R, E>>>,
    received: usize,
    failed: usize,
    fault: Option<(usize, String)>,
}

impl<R, E: fmt::Display> Collector<R, E> {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            slots: (0..total).map(|_| None).collect(),
            received: 0,
            failed: 0,
            fault: None,
        }
    }

    pub(crate) const fn received(&self) -> usize {
        self.received
    }

    pub(crate) const fn failed(&self) -> usize {
        self.failed
    }

    /// Receives records until every slot is filled.
    ///
    /// Stops early when the channel disconnects, which happens once all
    /// workers have exited. That is expected after a panic (the workers stop
    /// taking jobs) and turns into [`Error::OperationPanicked`]; any other
    /// shortfall is reported as [`Error::WorkersLost`].
    pub(crate) fn collect<P>(&mut self, results: &Receiver<Record<R, E>>, reporter: &mut P) -> Result<()>
    where
        P: Reporter + ?Sized,
    {
        let total = self.slots.len();

        while self.received < total {
            let Ok(Record { index, outcome }) = results.recv() else {
                break;
            };
            match outcome {
                Outcome::Done(result) => self.store(index, result, reporter),
                Outcome::Panicked(message) => {
                    // Keep the first fault; later ones are a consequence of
                    // the same abort.
                    if self.fault.is_none() {
                        self.fault = Some((index, message));
                    }
                }
            }
        }

        if let Some((index, message)) = self.fault.take() {
            return Err(Error::OperationPanicked { index, message });
        }
        if self.received < total {
            return Err(Error::WorkersLost {
                expected: total,
                received: self.received,
            });
        }
        Ok(())
    }

    fn store<P>(&mut self, index: usize, result: Result<R, E>, reporter: &mut P)
    where
        P: Reporter + ?Sized,
    {
        if let Err(error) = &result {
            self.failed += 1;
            reporter.on_error(index, error);
        }

        let slot = &mut self.slots[index];
        debug_assert!(slot.is_none(), "slot {index} written twice");
        *slot = Some(result);
        self.received += 1;
        reporter.on_item(index);
    }

    /// Hands over the assembled slots. Only valid after a successful
    /// [`collect`](Self::collect).
    pub(crate) fn finish(self) -> Result<Mapped<R, E>> {
        let expected = self.slots.len();
        let received = self.received;
        let results: Option<Vec<_>> = self.slots.into_iter().collect();
        results
            .map(Mapped::from_results)
            .ok_or(Error::WorkersLost { expected, received })
    }
}
