//! The capture boundary between disruptable computations and [`Try`].
//!
//! A disruptable computation is any closure whose outcome is a
//! `Result<_, E>` with `E: Into<Error>`:
//!
//! | shape     | closure                        |
//! |-----------|--------------------------------|
//! | supplier  | `FnOnce() -> Result<T, E>`     |
//! | transform | `FnOnce(T) -> Result<U, E>`    |
//! | predicate | `FnOnce(&T) -> Result<bool, E>`|
//! | action    | `FnOnce() -> Result<(), E>`    |
//!
//! Every combinator that invokes one hands its outcome to this module, so an
//! error never travels further than the combinator call that produced it.

use crate::error::Error;
use crate::outcome::Try;

/// Wrap the outcome of a disruptable computation.
pub(crate) fn capture<T, E>(outcome: Result<T, E>) -> Try<T>
where
    E: Into<Error>,
{
    match outcome {
        Ok(value) => Try::Success(value),
        Err(error) => Try::Failure(disrupted(error)),
    }
}

/// Convert an error raised by a disruptable computation into its captured form.
pub(crate) fn disrupted<E>(error: E) -> Error
where
    E: Into<Error>,
{
    let error = error.into();
    tracing::trace!(error = %error, "captured disrupted computation");
    error
}

/// Output of a transform handed to [`Try::flat_map`] or [`Try::recover_with`].
///
/// A transform may produce a [`Try`] directly, or it may itself fail before
/// producing one, in which case it returns `Result<Try<T>, E>`. Both collapse
/// to a single `Try<T>`; nothing is ever wrapped twice.
pub trait IntoTry {
    /// The success type of the resulting [`Try`].
    type Value;

    /// Collapse into a single [`Try`].
    fn into_try(self) -> Try<Self::Value>;
}

impl<T> IntoTry for Try<T> {
    type Value = T;

    fn into_try(self) -> Try<T> {
        self
    }
}

impl<T, E> IntoTry for Result<Try<T>, E>
where
    E: Into<Error>,
{
    type Value = T;

    fn into_try(self) -> Try<T> {
        match self {
            Ok(produced) => produced,
            Err(error) => Try::Failure(disrupted(error)),
        }
    }
}

impl<T, E> From<Result<T, E>> for Try<T>
where
    E: Into<Error>,
{
    fn from(outcome: Result<T, E>) -> Self {
        capture(outcome)
    }
}
