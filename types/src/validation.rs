//! Input contract checks.
//!
//! These mirror what a form layer enforces before a value ever reaches the
//! engine: non-blank names, positive finite money, sane share counts and a
//! bounded SAFE discount.

use thiserror::Error;

/// Upper bound (inclusive) on a SAFE discount, in percent.
pub const MAX_SAFE_DISCOUNT: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },
    #[error("{field} must be a finite number (got {value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero")]
    ZeroShares { field: &'static str },
    #[error("founder shares ({founders}) exceed total shares ({total})")]
    FoundersExceedTotal { founders: u64, total: u64 },
    #[error("discount must be between 0 and {max}% (got {value})")]
    DiscountOutOfRange { value: f64, max: f64 },
    #[error("SAFE #{index} ({investor}): {source}")]
    Safe {
        index: usize,
        investor: String,
        source: Box<ValidationError>,
    },
    #[error("pricing round #{index} ({round}): {source}")]
    Round {
        index: usize,
        round: String,
        source: Box<ValidationError>,
    },
}

pub(crate) fn require_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyName { field });
    }
    Ok(())
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field, value });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

pub(crate) fn require_shares(field: &'static str, value: u64) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::ZeroShares { field });
    }
    Ok(())
}

pub(crate) fn require_discount(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            field: "discount",
            value,
        });
    }
    if !(0.0..=MAX_SAFE_DISCOUNT).contains(&value) {
        return Err(ValidationError::DiscountOutOfRange {
            value,
            max: MAX_SAFE_DISCOUNT,
        });
    }
    Ok(())
}
