//! Input validation.
//!
//! Every calculator takes a small set of named scalars that must all be
//! finite and strictly positive. Missing, NaN, infinite, zero and negative
//! values are not distinguished: they all produce the same
//! [`LabError::Input`](crate::error::LabError::Input).

use crate::error::{LabError, Result};

/// A named input value, e.g. `("R", 10.0)`.
pub type Field = (&'static str, f64);

/// Check that a single value is usable by the calculators.
pub fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Validate that every field is finite and strictly positive.
///
/// The error message lists all required fields, not just the offending
/// ones, e.g. "Please enter positive values for Vs, f, R and C."
pub fn require_positive(fields: &[Field]) -> Result<()> {
    if all_positive(fields) {
        return Ok(());
    }

    Err(LabError::input(format!(
        "Please enter positive values for {}.",
        join_names(fields)
    )))
}

/// Validate that every field is finite and strictly positive, reporting
/// `message` verbatim on failure.
pub fn require_positive_or(fields: &[Field], message: &str) -> Result<()> {
    if all_positive(fields) {
        return Ok(());
    }

    Err(LabError::input(message))
}

fn all_positive(fields: &[Field]) -> bool {
    fields.iter().all(|&(_, value)| is_positive_finite(value))
}

fn join_names(fields: &[Field]) -> String {
    match fields {
        [] => String::new(),
        [(only, _)] => (*only).to_string(),
        [init @ .., (last, _)] => {
            let head: Vec<&str> = init.iter().map(|(name, _)| *name).collect();
            format!("{} and {}", head.join(", "), last)
        }
    }
}
