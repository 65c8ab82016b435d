//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary values cross the API and storage boundary as `f64` currency
//! units; every calculation runs on `Decimal` and is rounded to 2 decimal
//! places before conversion back.

use rust_decimal::prelude::*;

use crate::utils::AppError;

/// Rounding precision for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Flat tax rate applied uniformly at order-total computation time (10%)
pub const TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Maximum allowed payment or line amount
const MAX_AMOUNT: f64 = 1_000_000.0;

pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Round to currency precision (half-up).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `max(0, total + tax - discount)` at currency precision.
pub fn final_amount(total: Decimal, tax: Decimal, discount: Decimal) -> Decimal {
    round2((total + tax - discount).max(Decimal::ZERO))
}

/// Validate that an amount is a finite, positive, sane currency value.
pub fn require_positive_amount(value: f64, field_name: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field_name} must be a finite number, got {value}"
        )));
    }
    if value <= 0.0 {
        return Err(AppError::validation(format!(
            "{field_name} must be positive, got {value}"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(AppError::validation(format!(
            "{field_name} exceeds maximum allowed ({MAX_AMOUNT}), got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_rate_is_ten_percent() {
        assert_eq!(TAX_RATE, Decimal::new(1, 1));
    }

    #[test]
    fn final_amount_floors_at_zero() {
        let total = to_decimal(50.0);
        let tax = to_decimal(5.0);
        assert_eq!(to_f64(final_amount(total, tax, to_decimal(2.0))), 53.0);
        assert_eq!(to_f64(final_amount(total, tax, to_decimal(100.0))), 0.0);
    }

    #[test]
    fn round2_is_half_up() {
        assert_eq!(to_f64(round2(to_decimal(1.005))), 1.01);
        assert_eq!(to_f64(round2(to_decimal(1.004))), 1.0);
    }

    #[test]
    fn rejects_non_finite_and_non_positive() {
        assert!(require_positive_amount(f64::NAN, "amount").is_err());
        assert!(require_positive_amount(f64::INFINITY, "amount").is_err());
        assert!(require_positive_amount(0.0, "amount").is_err());
        assert!(require_positive_amount(-1.0, "amount").is_err());
        assert!(require_positive_amount(10.0, "amount").is_ok());
    }
}
