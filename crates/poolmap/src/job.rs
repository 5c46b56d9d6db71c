//! Messages exchanged between the dispatcher, the workers and the collector.

/// One input element tagged with its position in the input.
#[derive(Debug)]
pub(crate) struct Job<T> {
    pub(crate) index: usize,
    pub(crate) input: T,
}

/// What a worker reports back for a single [`Job`].
#[derive(Debug)]
pub(crate) struct Record<R, E> {
    pub(crate) index: usize,
    pub(crate) outcome: Outcome<R, E>,
}

#[derive(Debug)]
pub(crate) enum Outcome<R, E> {
    /// The operation returned, successfully or not.
    Done(Result<R, E>),
    /// The operation unwound. Carries the panic message.
    Panicked(String),
}
