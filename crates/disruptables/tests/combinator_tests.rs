/// Integration tests for the Try combinators

use std::cell::Cell;
use std::io;

use disruptables::{Error, PredicateUnsatisfied, Try};

#[derive(Debug, thiserror::Error)]
#[error("boom {0}")]
struct Boom(u32);

#[derive(Debug, thiserror::Error)]
#[error("division by zero")]
struct DivisionByZero;

/// Helper to build a failure together with a handle on its error
fn failure<T>(code: u32) -> (Try<T>, Error) {
    let error = Error::new(Boom(code));
    (Try::Failure(error.clone()), error)
}

/// Helper to count how often a closure runs
fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

fn quotient(dividend: &str, divisor: &str) -> Try<f64> {
    Try::from_supplier(|| -> Result<f64, Error> {
        let dividend: f64 = dividend.parse()?;
        let divisor: f64 = divisor.parse()?;
        if divisor == 0.0 {
            return Err(DivisionByZero.into());
        }
        Ok(dividend / divisor)
    })
}

#[test]
fn test_supplier_value_becomes_success() {
    for v in [0, 1, -7, i64::MAX] {
        assert_eq!(Try::from_supplier(|| Ok::<_, Error>(v)), Try::Success(v));
    }
}

#[test]
fn test_supplier_error_becomes_failure() {
    let outcome = Try::<i32>::from_supplier(|| Err(Boom(1)));
    let error = outcome.failure().expect("expected a failure");
    assert!(error.is::<Boom>());
    assert_eq!(error.to_string(), "boom 1");
}

#[test]
fn test_map_identity_on_success() {
    assert_eq!(Try::Success(42).map(|v| Ok::<_, Error>(v)), Try::Success(42));
}

#[test]
fn test_map_on_failure_never_invokes_transform() {
    let calls = Cell::new(0);
    let (outcome, error) = failure::<i32>(2);
    let mapped = outcome.map(|v| {
        bump(&calls);
        Ok::<_, Error>(v + 1)
    });
    assert_eq!(mapped, Try::Failure(error));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_map_captures_transform_error() {
    let mapped = Try::Success("12x").map(|s| s.parse::<u8>());
    assert!(mapped.failure().unwrap().is::<std::num::ParseIntError>());
}

#[test]
fn test_failure_chain_short_circuits_until_recovery() {
    let calls = Cell::new(0);
    let recovered = Cell::new(0);
    let (outcome, error) = failure::<i32>(3);

    let result = outcome
        .map(|v| {
            bump(&calls);
            Ok::<_, Error>(v * 2)
        })
        .filter(|_| {
            bump(&calls);
            Ok::<_, Error>(true)
        })
        .flat_map(|v| {
            bump(&calls);
            Try::Success(v)
        })
        .recover(|e| {
            bump(&recovered);
            assert_eq!(e, error);
            Ok::<_, Error>(-1)
        });

    assert_eq!(result, Try::Success(-1));
    assert_eq!(calls.get(), 0);
    assert_eq!(recovered.get(), 1);
}

#[test]
fn test_filter_false_yields_predicate_failure() {
    let filtered = Try::Success(10).filter(|v| Ok::<_, Error>(*v < 5));
    let error = filtered.failure().unwrap();
    assert!(error.is::<PredicateUnsatisfied>());
    assert_eq!(error.to_string(), "predicate does not hold for 10");
}

#[test]
fn test_filter_true_keeps_success() {
    assert_eq!(Try::Success(4).filter(|v| Ok::<_, Error>(*v < 5)), Try::Success(4));
}

#[test]
fn test_filter_predicate_error_is_captured() {
    let filtered = Try::Success(10).filter(|_| Err(Boom(4)));
    let error = filtered.failure().unwrap();
    assert_eq!(error.downcast_ref::<Boom>().unwrap().0, 4);
}

#[test]
fn test_recover_failure_replaces_original() {
    let (outcome, original) = failure::<i32>(5);
    let recovered = outcome.recover(|_| Err(Boom(6)));
    let error = recovered.failure().unwrap();
    assert_ne!(*error, original);
    assert_eq!(error.downcast_ref::<Boom>().unwrap().0, 6);
    assert!(error.source().is_none());
}

#[test]
fn test_recover_on_success_never_invokes_mapper() {
    let calls = Cell::new(0);
    let outcome = Try::Success(1)
        .recover(|_| {
            bump(&calls);
            Ok::<_, Error>(2)
        })
        .recover_with(|_| {
            bump(&calls);
            Try::Success(3)
        });
    assert_eq!(outcome, Try::Success(1));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_capitulate_matching_kind_reraises() {
    let (outcome, _) = failure::<i32>(7);
    let raised = outcome.capitulate::<Boom>().unwrap_err();
    assert_eq!(raised.0, 7);
}

#[test]
fn test_capitulate_other_kind_returns_same_failure() {
    let (outcome, error) = failure::<i32>(8);
    let kept = outcome.capitulate::<io::Error>().unwrap();
    assert_eq!(kept, Try::Failure(error));
}

#[test]
fn test_capitulate_on_success_is_noop() {
    assert_eq!(Try::Success("ok").capitulate::<Boom>().unwrap(), Try::Success("ok"));
    assert_eq!(Try::EMPTY.capitulate::<io::Error>().unwrap(), Try::EMPTY);
}

#[test]
fn test_flat_map_does_not_double_wrap() {
    let g = |x: i32| x * 3;
    let chained = Try::Success(5).flat_map(|x| Try::Success(g(x)));
    assert_eq!(chained, Try::Success(g(5)));
}

#[test]
fn test_flat_map_transform_error_is_captured() {
    let chained = Try::Success("x").flat_map(|s| -> Result<Try<u8>, Error> {
        let n = s.parse::<u8>()?;
        Ok(Try::Success(n))
    });
    assert!(chained.is_failure());
}

#[test]
fn test_to_optional() {
    let (outcome, _) = failure::<i32>(9);
    assert_eq!(outcome.to_optional(), None);
    assert_eq!(Try::Success(3).to_optional(), Some(3));
    assert_eq!(Try::Success(Some(3)).to_flattened_optional(), Some(3));
    assert_eq!(Try::<Option<i32>>::Success(None).to_flattened_optional(), None);
}

#[test]
fn test_absent_success_still_distinct_from_failure() {
    let absent: Try<Option<i32>> = Try::Success(None);
    assert!(absent.is_success());
    let (failed, _) = failure::<Option<i32>>(10);
    assert_ne!(absent, failed);
    assert_eq!(absent.clone().to_flattened_optional(), failed.to_flattened_optional());
}

#[test]
fn test_equality() {
    let (a, error) = failure::<i32>(11);
    assert_eq!(a, Try::Failure(error));
    let (b, _) = failure::<i32>(11);
    assert_ne!(a, b);
    assert_ne!(Try::Success(1), a);
    assert_eq!(Try::Success(1), Try::Success(1));
}

#[test]
fn test_get_reraises_captured_error() {
    let (outcome, error) = failure::<i32>(12);
    assert_eq!(outcome.get().unwrap_err(), error);
    assert_eq!(Try::Success(1).get().unwrap(), 1);
}

#[test]
fn test_or_else_throw_maps_error() {
    let (outcome, _) = failure::<i32>(13);
    let raised = outcome.or_else_throw(|e| io::Error::new(io::ErrorKind::Other, e.to_string()));
    assert_eq!(raised.unwrap_err().to_string(), "boom 13");
}

#[test]
fn test_or_else_get_fallback_success_replaces_failure() {
    let calls = Cell::new(0);
    let (outcome, _) = failure::<i32>(15);
    let recovered = outcome.or_else_get(|| {
        bump(&calls);
        Ok::<_, Error>(21)
    });
    assert_eq!(recovered, Try::Success(21));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_boxed_error_keeps_kind_through_capture() {
    fn open() -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(io::Error::new(io::ErrorKind::NotFound, "config")))
    }

    let outcome = Try::from_supplier(|| open().map_err(Error::from_boxed));
    assert!(outcome.failure().unwrap().is::<io::Error>());
    let raised = outcome.capitulate::<io::Error>().unwrap_err();
    assert_eq!(raised.kind(), io::ErrorKind::NotFound);
}

#[test]
fn test_quotient_falls_back_to_nan() {
    let outcome = quotient("10", "0");
    assert!(outcome.failure().unwrap().is::<DivisionByZero>());
    assert!(outcome.or_else(f64::NAN).is_nan());
    assert_eq!(quotient("10", "4").or_else(f64::NAN), 2.5);
}

#[test]
fn test_action_failure_reaches_handler() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.txt");

    let outcome = Try::from_action(|| std::fs::write(&path, "hello"));

    let succeeded = Cell::new(false);
    let mut received = None;
    outcome
        .if_success(|_| succeeded.set(true))
        .if_failed(|e| received = Some(e.clone()));

    let received = received.expect("handler should receive the error");
    assert_eq!(Some(&received), outcome.failure());
    assert_eq!(
        received.downcast_ref::<io::Error>().unwrap().kind(),
        io::ErrorKind::NotFound
    );
    assert!(!succeeded.get());
}

#[test]
fn test_action_success_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let outcome = Try::from_action(|| std::fs::write(&path, "hello"));
    assert_eq!(outcome, Try::EMPTY);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
}

#[test]
fn test_results_are_shareable_across_threads() {
    let (outcome, error) = failure::<i32>(14);
    let handle = std::thread::spawn(move || outcome.failure().cloned());
    assert_eq!(handle.join().unwrap(), Some(error));
}
