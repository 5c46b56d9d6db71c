//! Error types for a [`map`](crate::map) call.
//!
//! Only failures of the call as a whole live here. An operation that fails for
//! a single element is not an [`Error`]: its error value is stored in the
//! matching slot of [`Mapped::errors`](crate::Mapped::errors) and the rest of
//! the batch carries on.
//!
//! ## Error Cases
//! - `InvalidWorkerCount`: the pool was configured with zero workers.
//! - `OperationPanicked`: the operation panicked while processing an element.
//! - `Spawn`: the OS refused to start a worker thread.
//! - `WorkersLost`: every worker exited before all results were delivered.

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failures that abort a whole [`map`](crate::map) call.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The worker count was zero.
    ///
    /// A pool without workers would never produce a result, so the call is
    /// rejected before anything is spawned, even for an empty input.
    #[error("worker count must be at least 1 (got {workers})")]
    InvalidWorkerCount { workers: usize },

    /// The operation panicked while processing the element at `index`.
    ///
    /// The remaining workers stop taking new jobs once this happens and the
    /// call returns after the pool has wound down. No partial output is
    /// returned.
    #[error("operation panicked on element {index}: {message}")]
    OperationPanicked { index: usize, message: String },

    /// A worker thread could not be spawned.
    #[error("failed to spawn worker thread: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },

    /// The result channel closed before every element was accounted for.
    #[error("worker pool exited after delivering {received} of {expected} results")]
    WorkersLost { expected: usize, received: usize },
}
