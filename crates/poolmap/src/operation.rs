use core::fmt;

/// The work applied to every element of a batch.
///
/// An operation is shared by reference between all workers of a pool, so it
/// must be [`Sync`]. It should not rely on the pool for any locking: if it has
/// side effects that need coordination, it owns that coordination.
///
/// Closures of the shape `Fn(T) -> Result<R, E>` implement this trait
/// automatically. Implement it by hand when the operation carries state that
/// reads better as a named type.
///
/// ```
/// use poolmap::{MapConfig, Operation, map};
///
/// struct Scale(i64);
///
/// impl Operation<i64> for Scale {
///     type Output = i64;
///     type Error = String;
///
///     fn apply(&self, input: i64) -> Result<i64, String> {
///         input.checked_mul(self.0).ok_or_else(|| format!("{input} overflows"))
///     }
/// }
///
/// let mapped = map(vec![1, 2, 3], Scale(10), &MapConfig::new(2).with_silent(true)).unwrap();
/// assert_eq!(mapped.outputs(), &[Some(10), Some(20), Some(30)]);
/// ```
pub trait Operation<T>: Sync {
    /// Value produced for a successful element.
    type Output: Send;
    /// Per-element failure. Displayed by reporters when it occurs.
    type Error: Send + fmt::Display;

    /// Processes one element.
    fn apply(&self, input: T) -> Result<Self::Output, Self::Error>;
}

impl<T, R, E, F> Operation<T> for F
where
    F: Fn(T) -> Result<R, E> + Sync,
    R: Send,
    E: Send + fmt::Display,
{
    type Output = R;
    type Error = E;

    #[inline]
    fn apply(&self, input: T) -> Result<R, E> {
        self(input)
    }
}
