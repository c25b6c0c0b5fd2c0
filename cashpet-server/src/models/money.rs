//! Money amounts
//!
//! Stored as NUMERIC(14,2); anything finer than a cent is rounded away on entry.

use rust_decimal::{Decimal, RoundingStrategy};

use super::ValidationError;

/// Largest value a NUMERIC(14,2) column holds.
fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999_999, 2)
}

/// Validated, strictly positive money amount with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Validate an amount for `field`.
    ///
    /// # Rules
    /// - Rounded to 2 decimal places, half away from zero
    /// - Must be greater than zero after rounding
    /// - Must fit NUMERIC(14,2)
    pub fn new(field: &'static str, value: Decimal) -> Result<Self, ValidationError> {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        if rounded <= Decimal::ZERO {
            return Err(ValidationError::NotPositive { field });
        }

        if rounded > max_amount() {
            return Err(ValidationError::OutOfRange {
                field,
                reason: "exceeds 999999999999.99",
            });
        }

        Ok(Self(rounded))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn max_amount_matches_column() {
        assert_eq!(max_amount(), dec!(999999999999.99));
    }

    #[test]
    fn rounds_to_cents() {
        let amount = Amount::new("amount", dec!(12.345)).unwrap();
        assert_eq!(amount.value(), dec!(12.35));

        let amount = Amount::new("amount", dec!(12.344)).unwrap();
        assert_eq!(amount.value(), dec!(12.34));

        // no banker's rounding on the half cent
        let amount = Amount::new("amount", dec!(250.505)).unwrap();
        assert_eq!(amount.value(), dec!(250.51));

        let amount = Amount::new("amount", dec!(1500)).unwrap();
        assert_eq!(amount.value(), dec!(1500));
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert_eq!(
            Amount::new("amount", Decimal::ZERO).unwrap_err(),
            ValidationError::NotPositive { field: "amount" }
        );
        assert!(Amount::new("amount", dec!(-5)).is_err());
        // rounds to zero
        assert!(Amount::new("amount", dec!(0.004)).is_err());
        assert_eq!(Amount::new("amount", dec!(0.005)).unwrap().value(), dec!(0.01));
    }

    #[test]
    fn rejects_overflowing_amounts() {
        assert!(Amount::new("amount", dec!(999999999999.99)).is_ok());
        assert!(matches!(
            Amount::new("amount", dec!(1000000000000)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
