//! Financial summary queries
//!
//! Totals come from one aggregate over transactions joined to their
//! categories; the balance and goal percentages are derived in
//! [`FinancialSummary`].

use rust_decimal::Decimal;
use sqlx::{PgPool, Row};

use super::goals::GoalRepo;
use super::users::ensure_user;
use super::DbError;
use crate::models::{CategoryKind, FinancialSummary, GoalProgress};

/// Summary repository
pub struct SummaryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SummaryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Income/expense totals, balance and open-goal progress for a user.
    pub async fn for_user(&self, user_id: i64) -> Result<FinancialSummary, DbError> {
        let mut conn = self.pool.acquire().await?;
        ensure_user(&mut conn, user_id).await?;

        let row = sqlx::query(
            r#"
            SELECT
                COALESCE(SUM(t.amount) FILTER (WHERE c.type = $2), 0) AS total_income,
                COALESCE(SUM(t.amount) FILTER (WHERE c.type = $3), 0) AS total_expense
            FROM transactions t
            JOIN categories c ON c.category_id = t.category_id
            WHERE t.user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(CategoryKind::Income.as_str())
        .bind(CategoryKind::Expense.as_str())
        .fetch_one(&mut *conn)
        .await?;

        // release before the goal query borrows its own connection
        drop(conn);

        let total_income: Decimal = row.try_get("total_income")?;
        let total_expense: Decimal = row.try_get("total_expense")?;

        let goals_progress = GoalRepo::new(self.pool)
            .list_open_for_user(user_id)
            .await?
            .into_iter()
            .map(|g| GoalProgress::new(g.goal_id, g.name, g.current_amount, g.target_amount))
            .collect();

        Ok(FinancialSummary::new(
            user_id,
            total_income,
            total_expense,
            goals_progress,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::{
        CategoryRepo, NewCategory, NewTransaction, NewUser, TransactionRepo, UserRepo,
    };
    use crate::models::{Amount, CategoryName, Email, Password, Username};
    use rust_decimal_macros::dec;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn balance_from_ledger() {
        let pool = crate::db::create_pool(&crate::DatabaseSettings::from_env())
            .await
            .expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");

        let tag = uuid::Uuid::new_v4().simple().to_string();
        let user = UserRepo::new(&pool)
            .create(NewUser {
                username: Username::new(&format!("ledger-{tag}")).unwrap(),
                email: Email::new(&format!("ledger-{tag}@example.com")).unwrap(),
                password: Password::new("secret").unwrap(),
            })
            .await
            .expect("user");

        let empty = SummaryRepo::new(&pool).for_user(user.user_id).await.expect("summary");
        assert_eq!(empty.balance, Decimal::ZERO);

        let categories = CategoryRepo::new(&pool);
        let salary = categories
            .create(
                user.user_id,
                NewCategory {
                    name: CategoryName::new("Salary").unwrap(),
                    kind: CategoryKind::Income,
                    description: None,
                },
            )
            .await
            .expect("income category");
        let food = categories
            .create(
                user.user_id,
                NewCategory {
                    name: CategoryName::new("Food").unwrap(),
                    kind: CategoryKind::Expense,
                    description: None,
                },
            )
            .await
            .expect("expense category");

        let transactions = TransactionRepo::new(&pool);
        for (category_id, amount) in [
            (salary.category_id, dec!(100)),
            (salary.category_id, dec!(200)),
            (food.category_id, dec!(50)),
        ] {
            transactions
                .create(
                    user.user_id,
                    NewTransaction {
                        category_id,
                        amount: Amount::new("amount", amount).unwrap(),
                        description: None,
                        date: chrono::Utc::now().date_naive(),
                        is_recurring: false,
                        recurring_frequency: None,
                    },
                )
                .await
                .expect("transaction");
        }

        let summary = SummaryRepo::new(&pool).for_user(user.user_id).await.expect("summary");
        assert_eq!(summary.total_income, dec!(300));
        assert_eq!(summary.total_expense, dec!(50));
        assert_eq!(summary.balance, dec!(250));
    }
}
