//! VAT derivation. Pre-VAT cost is always derived from the final cost,
//! once, at write time.

use crate::errors::{AppError, AppResult};

pub const VAT_RATE: f64 = 0.24;

pub fn pre_vat(final_cost: f64) -> f64 {
    final_cost / (1.0 + VAT_RATE)
}

/// Validate a final cost: finite and strictly positive.
pub fn check_cost(cost: f64) -> AppResult<f64> {
    if cost.is_finite() && cost > 0.0 {
        Ok(cost)
    } else {
        Err(AppError::InvalidAmount(format!(
            "{} (must be a number greater than 0)",
            cost
        )))
    }
}

/// Parse a user-typed cost. A decimal comma is accepted.
pub fn parse_cost(s: &str) -> AppResult<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Err(AppError::MissingField("final cost"));
    }
    let v: f64 = t
        .replace(',', ".")
        .parse()
        .map_err(|_| AppError::InvalidAmount(t.to_string()))?;
    check_cost(v)
}
