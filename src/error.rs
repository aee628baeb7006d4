//! Error taxonomy for the reporting pipeline.
//!
//! Only the environment probe is allowed to fail silently (it degrades to a
//! fallback string inside [`crate::platform`]); everything else surfaces as
//! a fatal error before any chart is drawn.

use crate::dataset::KeyAxis;
use crate::Variant;
use thiserror::Error;

/// Data-integrity errors in the measurement tables.
///
/// These are programming errors in the embedded literals, not runtime
/// conditions to recover from. The diagnostic names the exact cell so the
/// offending row can be found by inspection.
#[derive(Debug, Error)]
pub enum DataError {
    /// A variant has no entry for a canonical key
    #[error("{metric}: variant {variant} has no entry for {axis} {key}")]
    MissingKey {
        metric: &'static str,
        variant: Variant,
        axis: KeyAxis,
        key: u64,
    },

    /// A cell holds the wrong number of observations
    #[error(
        "{metric}: variant {variant} at {axis} {key} has {actual} observations, expected {expected}"
    )]
    WrongArity {
        metric: &'static str,
        variant: Variant,
        axis: KeyAxis,
        key: u64,
        expected: usize,
        actual: usize,
    },

    /// A pointwise ratio hit a zero denominator
    #[error(
        "{metric}: zero denominator for variant {variant} at {axis} {key}, observation {index}"
    )]
    DivisionByZero {
        metric: &'static str,
        variant: Variant,
        axis: KeyAxis,
        key: u64,
        index: usize,
    },

    /// Two paired tables do not index the same independent variable
    #[error("cannot pair tables '{numerator}' and '{denominator}': key axes differ")]
    AxisMismatch {
        numerator: &'static str,
        denominator: &'static str,
    },
}
