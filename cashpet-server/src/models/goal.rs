//! Savings goals: funding and progress

use rust_decimal::Decimal;

use super::validation::bounded_text;
use super::{Amount, ValidationError};

const MAX_GOAL_NAME_LEN: usize = 100;

/// Validated goal name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalName(String);

impl GoalName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text("goal name", s, MAX_GOAL_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Saved amount and completion flag of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalBalance {
    pub current_amount: Decimal,
    pub is_completed: bool,
}

impl GoalBalance {
    /// Add `amount` towards `target`.
    ///
    /// Reaching the target completes the goal and pins the saved amount at
    /// exactly `target`; any surplus is dropped.
    ///
    /// # Example
    /// ```
    /// use cashpet_server::models::{Amount, GoalBalance};
    /// use rust_decimal::Decimal;
    ///
    /// let balance = GoalBalance { current_amount: Decimal::new(50_000, 0), is_completed: false };
    /// let amount = Amount::new("amount", Decimal::new(60_000, 0)).unwrap();
    /// let funded = balance.fund(amount, Decimal::new(100_000, 0));
    /// assert_eq!(funded.current_amount, Decimal::new(100_000, 0));
    /// assert!(funded.is_completed);
    /// ```
    pub fn fund(self, amount: Amount, target: Decimal) -> Self {
        let current = self.current_amount + amount.value();

        if current >= target {
            Self {
                current_amount: target,
                is_completed: true,
            }
        } else {
            Self {
                current_amount: current,
                is_completed: self.is_completed,
            }
        }
    }
}

/// Percentage of `target` saved, rounded to 2 places; 0 for a non-positive target.
pub fn progress_percentage(current: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    (current / target * Decimal::ONE_HUNDRED).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amount(value: Decimal) -> Amount {
        Amount::new("amount", value).unwrap()
    }

    #[test]
    fn partial_funding() {
        let balance = GoalBalance {
            current_amount: dec!(100),
            is_completed: false,
        };
        let funded = balance.fund(amount(dec!(250.50)), dec!(1000));
        assert_eq!(funded.current_amount, dec!(350.50));
        assert!(!funded.is_completed);
    }

    #[test]
    fn surplus_is_discarded() {
        let balance = GoalBalance {
            current_amount: dec!(50000),
            is_completed: false,
        };
        let funded = balance.fund(amount(dec!(60000)), dec!(100000));
        assert_eq!(funded.current_amount, dec!(100000));
        assert!(funded.is_completed);
    }

    #[test]
    fn exact_target_completes() {
        let balance = GoalBalance {
            current_amount: dec!(40),
            is_completed: false,
        };
        let funded = balance.fund(amount(dec!(60)), dec!(100));
        assert_eq!(funded.current_amount, dec!(100));
        assert!(funded.is_completed);
    }

    #[test]
    fn completed_goal_stays_pinned() {
        let balance = GoalBalance {
            current_amount: dec!(100000),
            is_completed: true,
        };
        let funded = balance
            .fund(amount(dec!(1)), dec!(100000))
            .fund(amount(dec!(5000)), dec!(100000));
        assert_eq!(funded.current_amount, dec!(100000));
        assert!(funded.is_completed);
    }

    #[test]
    fn progress_rounding() {
        assert_eq!(progress_percentage(dec!(50000), dec!(100000)), dec!(50));
        assert_eq!(progress_percentage(dec!(1), dec!(3)), dec!(33.33));
        assert_eq!(progress_percentage(dec!(2), dec!(3)), dec!(66.67));
    }

    #[test]
    fn progress_zero_target() {
        assert_eq!(progress_percentage(dec!(10), Decimal::ZERO), Decimal::ZERO);
    }
}
