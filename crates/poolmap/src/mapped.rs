/// The result of a [`map`](crate::map) call, addressed by input position.
///
/// Holds two parallel sequences with one slot per input element. For every
/// index `i` exactly one of `outputs()[i]` and `errors()[i]` is `Some`: the
/// value the operation produced for `input[i]`, or the error it returned. The
/// placement does not depend on the order in which workers finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapped<R, E> {
    outputs: Vec<Option<R>>,
    errors: Vec<Option<E>>,
}

impl<R, E> Mapped<R, E> {
    /// Splits fully populated slots into the two parallel sequences.
    pub(crate) fn from_results(results: Vec<Result<R, E>>) -> Self {
        let (outputs, errors) = results
            .into_iter()
            .map(|result| match result {
                Ok(output) => (Some(output), None),
                Err(error) => (None, Some(error)),
            })
            .unzip();
        Self { outputs, errors }
    }

    /// Number of slots, equal to the number of input elements.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Produced values. `None` where the operation failed.
    pub fn outputs(&self) -> &[Option<R>] {
        &self.outputs
    }

    /// Per-element errors. `None` where the operation succeeded.
    pub fn errors(&self) -> &[Option<E>] {
        &self.errors
    }

    /// Number of elements whose operation failed.
    pub fn failed(&self) -> usize {
        self.errors.iter().filter(|e| e.is_some()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(Option::is_some)
    }

    /// Iterates over the slots in input order.
    pub fn iter(&self) -> impl Iterator<Item = Result<&R, &E>> + '_ {
        self.outputs
            .iter()
            .zip(&self.errors)
            .map(|slot| match slot {
                (Some(output), _) => Ok(output),
                (None, Some(error)) => Err(error),
                (None, None) => unreachable!("slot populated by neither output nor error"),
            })
    }

    /// Converts the slots back into one `Result` per element, in input order.
    pub fn into_results(self) -> Vec<Result<R, E>> {
        self.outputs
            .into_iter()
            .zip(self.errors)
            .map(|slot| match slot {
                (Some(output), _) => Ok(output),
                (None, Some(error)) => Err(error),
                (None, None) => unreachable!("slot populated by neither output nor error"),
            })
            .collect()
    }

    /// Returns the two parallel sequences `(outputs, errors)`.
    pub fn into_parts(self) -> (Vec<Option<R>>, Vec<Option<E>>) {
        (self.outputs, self.errors)
    }
}
