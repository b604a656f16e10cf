//! The `Try` type and its combinators.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::disruptable::{capture, disrupted, IntoTry};
use crate::error::{Error, PredicateUnsatisfied};

/// The outcome of a computation that may fail.
///
/// A `Try` is always exactly one of two states and never changes once built.
/// Every combinator consumes it and produces a new `Try` (or, for the
/// extracting operations, a plain value).
///
/// Combinators on a `Failure` short-circuit: the closure handed to `map`,
/// `flat_map` or `filter` is never invoked and the captured error travels on
/// unchanged. Only the recovery family (`recover`, `recover_with`,
/// `or_else_get`, `or_else_run`) runs on a `Failure`, and whatever those
/// closures raise replaces the original error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use = "this `Try` may be a `Failure`, which should be handled"]
pub enum Try<T> {
    /// The computation produced a value.
    Success(T),
    /// The computation was disrupted by an error.
    Failure(Error),
}

/// A success type with an explicit empty marker.
///
/// The marker stands for "succeeded without producing anything" and is never
/// a value a computation could mistake for a produced one: `()` carries no
/// value at all, and `Option` uses `None` for the absent value.
pub trait Empty {
    /// The empty marker.
    fn empty() -> Self;
}

impl Empty for () {
    fn empty() -> Self {}
}

impl<T> Empty for Option<T> {
    fn empty() -> Self {
        None
    }
}

impl Try<()> {
    /// The shared empty success, produced by [`Try::from_action`].
    pub const EMPTY: Try<()> = Try::Success(());

    /// Run `action` once and capture its outcome.
    ///
    /// Normal completion yields [`Try::EMPTY`].
    ///
    /// ```
    /// use disruptables::Try;
    ///
    /// let outcome = Try::from_action(|| std::fs::create_dir_all(std::env::temp_dir()));
    /// assert_eq!(outcome, Try::EMPTY);
    /// ```
    pub fn from_action<F, E>(action: F) -> Self
    where
        F: FnOnce() -> Result<(), E>,
        E: Into<Error>,
    {
        capture(action())
    }
}

impl<T> Try<T> {
    /// Run `supplier` once and capture its outcome.
    ///
    /// ```
    /// use disruptables::{Error, Try};
    ///
    /// let parsed = Try::from_supplier(|| -> Result<i32, Error> { Ok("42".parse::<i32>()?) });
    /// assert_eq!(parsed, Try::Success(42));
    ///
    /// let parsed = Try::from_supplier(|| "forty-two".parse::<i32>());
    /// assert!(parsed.is_failure());
    /// ```
    pub fn from_supplier<F, E>(supplier: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Error>,
    {
        capture(supplier())
    }

    /// An empty success, holding the explicit empty marker of `T`.
    pub fn empty() -> Self
    where
        T: Empty,
    {
        Try::Success(T::empty())
    }

    /// Extract the value, re-raising the captured error of a `Failure`.
    pub fn get(self) -> crate::Result<T> {
        match self {
            Try::Success(value) => Ok(value),
            Try::Failure(error) => Err(error),
        }
    }

    /// Extract the value, or `other` when this is a `Failure`.
    pub fn or_else(self, other: T) -> T {
        match self {
            Try::Success(value) => value,
            Try::Failure(_) => other,
        }
    }

    /// Try `supplier` in place of a `Failure`.
    ///
    /// `supplier` is only invoked on a `Failure`; if it fails too, its error
    /// is what the returned `Failure` carries.
    pub fn or_else_get<F, E>(self, supplier: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Error>,
    {
        match self {
            success @ Try::Success(_) => success,
            Try::Failure(_) => Self::from_supplier(supplier),
        }
    }

    /// Run `action` in place of a `Failure`.
    ///
    /// On normal completion of `action` the result is the empty success
    /// [`Try::empty`], so this is only offered for success types with an
    /// explicit empty marker.
    ///
    /// ```
    /// use disruptables::{Error, Try};
    ///
    /// let cached: Try<Option<u32>> = Try::Failure(Error::msg("cache miss"));
    /// assert_eq!(cached.or_else_run(|| Ok::<_, Error>(())), Try::Success(None));
    /// ```
    pub fn or_else_run<F, E>(self, action: F) -> Self
    where
        F: FnOnce() -> Result<(), E>,
        E: Into<Error>,
        T: Empty,
    {
        match self {
            success @ Try::Success(_) => success,
            Try::Failure(_) => capture(action().map(|()| T::empty())),
        }
    }

    /// Extract the value, or raise the error `mapper` builds from the
    /// captured one.
    ///
    /// ```
    /// use disruptables::{Error, Try};
    ///
    /// let outcome: Try<u8> = Try::Failure(Error::msg("no such port"));
    /// let raised = outcome.or_else_throw(|error| format!("lookup failed: {}", error));
    /// assert_eq!(raised, Err("lookup failed: no such port".to_string()));
    /// ```
    pub fn or_else_throw<X, M>(self, mapper: M) -> Result<T, X>
    where
        M: FnOnce(Error) -> X,
    {
        match self {
            Try::Success(value) => Ok(value),
            Try::Failure(error) => Err(mapper(error)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Try::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Try::Failure(_))
    }

    /// Hand the value of a `Success` to `handler`.
    pub fn if_success<H>(&self, handler: H) -> &Self
    where
        H: FnOnce(&T),
    {
        if let Try::Success(value) = self {
            handler(value);
        }
        self
    }

    /// Hand the captured error of a `Failure` to `handler`.
    pub fn if_failed<H>(&self, handler: H) -> &Self
    where
        H: FnOnce(&Error),
    {
        if let Try::Failure(error) = self {
            handler(error);
        }
        self
    }

    /// Keep a `Success` only if `predicate` holds for its value.
    ///
    /// A rejected value becomes a `Failure` carrying
    /// [`PredicateUnsatisfied`]; a predicate that fails becomes a `Failure`
    /// carrying the predicate's error.
    pub fn filter<P, E>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> Result<bool, E>,
        E: Into<Error>,
        T: fmt::Debug,
    {
        match self {
            Try::Success(value) => match predicate(&value) {
                Ok(true) => Try::Success(value),
                Ok(false) => Try::Failure(disrupted(PredicateUnsatisfied::new(&value))),
                Err(error) => Try::Failure(disrupted(error)),
            },
            failure @ Try::Failure(_) => failure,
        }
    }

    /// Transform the value of a `Success`.
    pub fn map<U, F, E>(self, transform: F) -> Try<U>
    where
        F: FnOnce(T) -> Result<U, E>,
        E: Into<Error>,
    {
        match self {
            Try::Success(value) => capture(transform(value)),
            Try::Failure(error) => Try::Failure(error),
        }
    }

    /// Chain a transform that produces a `Try` of its own.
    ///
    /// The produced `Try` is returned as is.
    ///
    /// ```
    /// use disruptables::{Error, Try};
    ///
    /// fn half(n: u32) -> Try<u32> {
    ///     if n % 2 == 0 {
    ///         Try::Success(n / 2)
    ///     } else {
    ///         Try::Failure(Error::msg(format!("{} is odd", n)))
    ///     }
    /// }
    ///
    /// assert_eq!(Try::Success(8).flat_map(half).flat_map(half), Try::Success(2));
    /// assert!(Try::Success(6).flat_map(half).flat_map(half).is_failure());
    /// ```
    pub fn flat_map<F, R>(self, transform: F) -> Try<R::Value>
    where
        F: FnOnce(T) -> R,
        R: IntoTry,
    {
        match self {
            Try::Success(value) => transform(value).into_try(),
            Try::Failure(error) => Try::Failure(error),
        }
    }

    /// Re-raise the captured error if it is of kind `K`.
    ///
    /// Errors of other kinds stay wrapped, and a `Success` is always
    /// returned unchanged.
    ///
    /// ```
    /// use std::io;
    /// use disruptables::{Error, Try};
    ///
    /// fn load() -> Result<Try<String>, std::sync::Arc<io::Error>> {
    ///     let outcome = Try::from_supplier(|| std::fs::read_to_string("/definitely/not/here"));
    ///     outcome.capitulate::<io::Error>()
    /// }
    ///
    /// assert!(load().is_err());
    ///
    /// let unrelated: Try<u8> = Try::Failure(Error::msg("unrelated"));
    /// assert!(unrelated.capitulate::<io::Error>().unwrap().is_failure());
    /// ```
    pub fn capitulate<K>(self) -> Result<Self, Arc<K>>
    where
        K: StdError + Send + Sync + 'static,
    {
        match self {
            Try::Failure(error) => match error.downcast::<K>() {
                Ok(narrowed) => {
                    tracing::debug!(error = %narrowed, "capitulating to captured error");
                    Err(narrowed)
                }
                Err(error) => Ok(Try::Failure(error)),
            },
            success @ Try::Success(_) => Ok(success),
        }
    }

    /// Derive a value from the captured error of a `Failure`.
    ///
    /// If `mapper` fails, its error replaces the original one.
    pub fn recover<F, E>(self, mapper: F) -> Self
    where
        F: FnOnce(Error) -> Result<T, E>,
        E: Into<Error>,
    {
        match self {
            success @ Try::Success(_) => success,
            Try::Failure(error) => capture(mapper(error)),
        }
    }

    /// Derive a whole new `Try` from the captured error of a `Failure`.
    pub fn recover_with<F, R>(self, mapper: F) -> Self
    where
        F: FnOnce(Error) -> R,
        R: IntoTry<Value = T>,
    {
        match self {
            success @ Try::Success(_) => success,
            Try::Failure(error) => mapper(error).into_try(),
        }
    }

    /// The value of a `Success`, or `None` for a `Failure`.
    pub fn to_optional(self) -> Option<T> {
        match self {
            Try::Success(value) => Some(value),
            Try::Failure(_) => None,
        }
    }

    /// Borrow the value, sharing the captured error.
    pub fn as_ref(&self) -> Try<&T> {
        match self {
            Try::Success(value) => Try::Success(value),
            Try::Failure(error) => Try::Failure(error.clone()),
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Try::Success(value) => Some(value),
            Try::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Error> {
        match self {
            Try::Success(_) => None,
            Try::Failure(error) => Some(error),
        }
    }
}

impl<T> Try<Option<T>> {
    /// The present value of a `Success`.
    ///
    /// A `Success` holding an absent value projects to `None`, the same as a
    /// `Failure` does.
    pub fn to_flattened_optional(self) -> Option<T> {
        self.to_optional().flatten()
    }
}

impl<T> From<Try<T>> for Result<T, Error> {
    fn from(outcome: Try<T>) -> Self {
        outcome.get()
    }
}

impl<T: fmt::Display> fmt::Display for Try<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Try::Success(value) => write!(f, "Success[{}]", value),
            Try::Failure(error) => write!(f, "Failure[{}]", error),
        }
    }
}
