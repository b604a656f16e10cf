//! Error types for captured disruptions.

use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use thiserror::Error;

/// An error captured from a disruptable computation.
///
/// `Error` is a shared handle: cloning it is cheap and every clone refers to
/// the same captured error. Equality and hashing follow that identity, so two
/// handles are equal only when they were cloned from the same capture.
///
/// Any `std::error::Error + Send + Sync + 'static` converts into `Error`,
/// which is what lets closures use `?` inside [`Try::from_supplier`] and the
/// combinators. `Error` deliberately does not implement `std::error::Error`
/// itself, so converting an `Error` into an `Error` never wraps it twice.
/// Type-erased errors go through [`Error::from_boxed`] (or
/// `Error::from_anyhow` with the `anyhow` feature), which keep the kind of
/// the error inside the box.
///
/// [`Try::from_supplier`]: crate::Try::from_supplier
#[derive(Clone)]
pub struct Error {
    error: Arc<dyn StdError + Send + Sync>,
}

impl Error {
    /// Capture `error`.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            error: Arc::new(error),
        }
    }

    /// Capture a boxed error.
    ///
    /// Kind checks see the error inside the box, so a boxed `io::Error`
    /// still satisfies `is::<io::Error>()`. A box made by
    /// [`Error::into_boxed`] unwraps to the very same captured error.
    ///
    /// ```
    /// use std::io;
    /// use disruptables::{Error, Try};
    ///
    /// fn open() -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    ///     Err(Box::new(io::Error::new(io::ErrorKind::NotFound, "config")))
    /// }
    ///
    /// let outcome = Try::from_supplier(|| open().map_err(Error::from_boxed));
    /// assert!(outcome.failure().unwrap().is::<io::Error>());
    /// ```
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        match error.downcast::<Shared>() {
            Ok(shared) => {
                let Shared(error) = *shared;
                error
            }
            Err(error) => Self {
                error: Arc::from(error),
            },
        }
    }

    /// Capture an `anyhow::Error`, keeping the kind of the error it wraps.
    #[cfg(feature = "anyhow")]
    pub fn from_anyhow(error: anyhow::Error) -> Self {
        Self::from_boxed(error.reallocate_into_boxed_dyn_error_without_backtrace())
    }

    /// Capture an ad-hoc error built from a message.
    ///
    /// The captured error is a [`Message`], which is also the kind to ask
    /// for when capitulating or downcasting.
    pub fn msg(message: impl fmt::Display) -> Self {
        Self::new(Message(message.to_string()))
    }

    /// Check whether the captured error is of kind `K`.
    pub fn is<K>(&self) -> bool
    where
        K: StdError + 'static,
    {
        (*self.error).is::<K>()
    }

    /// Borrow the captured error as kind `K`, if it is one.
    pub fn downcast_ref<K>(&self) -> Option<&K>
    where
        K: StdError + 'static,
    {
        (*self.error).downcast_ref::<K>()
    }

    /// Narrow the captured error to kind `K`.
    ///
    /// On a kind mismatch the handle is handed back unchanged.
    pub fn downcast<K>(self) -> Result<Arc<K>, Self>
    where
        K: StdError + Send + Sync + 'static,
    {
        if !self.is::<K>() {
            return Err(self);
        }
        let raw = Arc::into_raw(self.error);
        // SAFETY: the pointee was just checked to be a `K`, and `raw` came
        // from an `Arc` allocated with the size and alignment of that `K`.
        Ok(unsafe { Arc::from_raw(raw as *const K) })
    }

    /// Convert into a boxed standard error for other error stacks.
    ///
    /// The box displays and chains sources exactly like the captured error.
    pub fn into_boxed(self) -> Box<dyn StdError + Send + Sync + 'static> {
        Box::new(Shared(self))
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.error) as *const ()
    }
}

impl<E> From<E> for Error
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl From<Error> for Box<dyn StdError + Send + Sync + 'static> {
    fn from(error: Error) -> Self {
        error.into_boxed()
    }
}

impl Deref for Error {
    type Target = dyn StdError + Send + Sync + 'static;

    fn deref(&self) -> &Self::Target {
        &*self.error
    }
}

impl AsRef<dyn StdError + Send + Sync + 'static> for Error {
    fn as_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.error
    }
}

/// `{}` shows the captured error; `{:#}` appends its chain of sources.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if f.alternate() {
            let mut source = self.error.source();
            while let Some(cause) = source {
                write!(f, ": {}", cause)?;
                source = cause.source();
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.error, f)
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for Error {}

impl Hash for Error {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

/// A boxed view of a captured error.
#[derive(Debug)]
struct Shared(Error);

impl fmt::Display for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for Shared {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.error.source()
    }
}

/// An ad-hoc error carrying only a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Message(String);

impl Message {
    /// The message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A filter predicate rejected the success value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("predicate does not hold for {value}")]
pub struct PredicateUnsatisfied {
    value: String,
}

impl PredicateUnsatisfied {
    /// Create the error for a rejected value.
    pub fn new<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self {
            value: format!("{:?}", value),
        }
    }

    /// The `Debug` rendering of the rejected value.
    pub fn value(&self) -> &str {
        &self.value
    }
}
