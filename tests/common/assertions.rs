//! Logged assertion helpers.
//!
//! These wrap standard assertions with tracing logs so failures in CI carry
//! both values.

#![allow(dead_code)]

use std::fmt::Debug;

/// Assert equality with detailed logging.
#[track_caller]
pub fn assert_eq_logged<T: PartialEq + Debug>(context: &str, actual: T, expected: T) {
    tracing::debug!(
        context = context,
        expected = ?expected,
        actual = ?actual,
        "asserting equality"
    );

    if actual != expected {
        tracing::error!(
            context = context,
            expected = ?expected,
            actual = ?actual,
            "assertion failed: values not equal"
        );
    }

    assert_eq!(
        actual, expected,
        "{context}: expected {expected:?}, got {actual:?}"
    );
}

/// Assert that a result is `Ok` and return the value.
#[track_caller]
pub fn assert_ok_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> T {
    match result {
        Ok(value) => {
            tracing::trace!(context = context, value = ?value, "result is ok");
            value
        }
        Err(err) => {
            tracing::error!(context = context, error = ?err, "assertion failed: expected Ok");
            panic!("{context}: expected Ok, got Err({err:?})");
        }
    }
}

/// Assert that a result is `Err` and return the error.
#[track_caller]
pub fn assert_err_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> E {
    match result {
        Err(err) => {
            tracing::trace!(context = context, error = ?err, "result is err");
            err
        }
        Ok(value) => {
            tracing::error!(context = context, value = ?value, "assertion failed: expected Err");
            panic!("{context}: expected Err, got Ok({value:?})");
        }
    }
}

/// Assert two floats agree within `epsilon`.
#[track_caller]
pub fn assert_approx_eq_logged(context: &str, actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    tracing::debug!(context = context, actual, expected, diff, "asserting approximate equality");
    assert!(
        diff <= epsilon,
        "{context}: expected {expected} +/- {epsilon}, got {actual}"
    );
}

/// Assert that bracket output has one `</c>` for every `<c=...>`.
#[track_caller]
pub fn assert_bracket_balanced_logged(context: &str, rendered: &str) {
    let opens = rendered.matches("<c=").count();
    let closes = rendered.matches("</c>").count();
    tracing::debug!(context = context, opens, closes, rendered, "checking bracket balance");
    assert_eq!(opens, closes, "{context}: unbalanced output {rendered:?}");
}
