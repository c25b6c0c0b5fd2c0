//! Financial summary for a user

use rust_decimal::Decimal;
use serde::Serialize;

use super::goal::progress_percentage;

/// Progress of one incomplete goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal_id: i64,
    pub name: String,
    pub current_amount: Decimal,
    pub target_amount: Decimal,
    pub progress_percentage: Decimal,
}

impl GoalProgress {
    pub fn new(goal_id: i64, name: String, current_amount: Decimal, target_amount: Decimal) -> Self {
        Self {
            goal_id,
            name,
            current_amount,
            target_amount,
            progress_percentage: progress_percentage(current_amount, target_amount),
        }
    }
}

/// Income/expense totals, derived balance and goal progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub user_id: i64,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub goals_progress: Vec<GoalProgress>,
}

impl FinancialSummary {
    pub fn new(
        user_id: i64,
        total_income: Decimal,
        total_expense: Decimal,
        goals_progress: Vec<GoalProgress>,
    ) -> Self {
        Self {
            user_id,
            total_income,
            total_expense,
            balance: total_income - total_expense,
            goals_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn balance_is_income_minus_expense() {
        let income = dec!(100) + dec!(200);
        let expense = dec!(50);
        let summary = FinancialSummary::new(1, income, expense, vec![]);
        assert_eq!(summary.balance, dec!(250));
    }

    #[test]
    fn empty_ledger_is_zero() {
        let summary = FinancialSummary::new(1, Decimal::ZERO, Decimal::ZERO, vec![]);
        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.balance, Decimal::ZERO);
    }

    #[test]
    fn balance_may_go_negative() {
        let summary = FinancialSummary::new(1, dec!(10), dec!(25.5), vec![]);
        assert_eq!(summary.balance, dec!(-15.5));
    }

    #[test]
    fn goal_progress_percentage() {
        let progress = GoalProgress::new(7, "Vacation".into(), dec!(250), dec!(1000));
        assert_eq!(progress.progress_percentage, dec!(25));

        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["goal_id"], 7);
        assert_eq!(json["progress_percentage"], 25.0);
    }
}
