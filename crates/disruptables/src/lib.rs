//! Results of computations that may fail, captured as values.
//!
//! A [`Try`] reifies "a computation that may raise an error" into either a
//! `Success` carrying the produced value or a `Failure` carrying the error
//! that disrupted it. Callers defer, inspect, transform, filter and recover
//! from errors with combinators instead of handling them at every call site.
//!
//! Every closure this crate accepts is *disruptable*: it returns
//! `Result<_, E>` for any `E: Into<`[`Error`]`>`, and whatever error it
//! raises is captured into a `Failure` by the combinator that invoked it.
//! Errors only escape deliberately, through [`Try::get`],
//! [`Try::or_else_throw`] and [`Try::capitulate`].
//!
//! ```
//! use disruptables::{Error, Try};
//!
//! fn quotient(dividend: &str, divisor: &str) -> Try<f64> {
//!     Try::from_supplier(|| -> Result<f64, Error> {
//!         let dividend: f64 = dividend.parse()?;
//!         let divisor: f64 = divisor.parse()?;
//!         if divisor == 0.0 {
//!             return Err(Error::msg("division by zero"));
//!         }
//!         Ok(dividend / divisor)
//!     })
//! }
//!
//! assert_eq!(quotient("10", "4").or_else(f64::NAN), 2.5);
//! assert!(quotient("10", "0").or_else(f64::NAN).is_nan());
//! assert!(quotient("ten", "4").or_else(f64::NAN).is_nan());
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Try`].
//! - `anyhow`: `Error::from_anyhow`, capturing an `anyhow::Error` with its kind intact.

mod disruptable;
mod error;
mod outcome;
#[cfg(feature = "serde")]
mod wire;

pub use disruptable::IntoTry;
pub use error::{Error, Message, PredicateUnsatisfied};
pub use outcome::{Empty, Try};

/// Result type for re-raised captured errors.
pub type Result<T> = std::result::Result<T, Error>;
