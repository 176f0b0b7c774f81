//! Decimal arithmetic layer
//!
//! All money and score values flow through `rust_decimal::Decimal` (96-bit
//! mantissa, 28-29 significant digits, exact string round-trip), so repeated
//! additions of fractional reward amounts across thousands of participants
//! never accumulate floating-point error. Division is always guarded: a zero
//! denominator is a defined-zero branch for the caller, never an `Infinity`
//! or a panic.

pub use rust_decimal::Decimal;

use crate::error::{EngineError, Result};

/// Divide `numerator` by `denominator`, or `None` when the denominator is
/// zero. Callers decide what a zero denominator means (usually a zero share).
pub fn guarded_div(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        numerator.checked_div(denominator)
    }
}

/// Reject a negative counter or weight at the boundary.
///
/// Negative inputs would silently turn into negative payouts downstream, so
/// they are treated as configuration errors here.
pub fn ensure_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::NegativeValue {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
