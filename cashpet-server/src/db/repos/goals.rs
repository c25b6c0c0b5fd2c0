//! Goal repository
//!
//! Funding is a read-modify-write: the goal row is locked with
//! `SELECT ... FOR UPDATE`, the new balance is computed by
//! [`GoalBalance::fund`], and the result is written back in the same
//! transaction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use super::users::ensure_user;
use super::DbError;
use crate::models::{Amount, GoalBalance, GoalName};

const GOAL_COLUMNS: &str =
    "goal_id, user_id, name, target_amount, current_amount, deadline, is_completed, created_at";

/// Goal record from database
#[derive(Debug, Clone, FromRow)]
pub struct Goal {
    pub goal_id: i64,
    pub user_id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub is_completed: bool,
    pub created_at: NaiveDate,
}

impl Goal {
    pub fn balance(&self) -> GoalBalance {
        GoalBalance {
            current_amount: self.current_amount,
            is_completed: self.is_completed,
        }
    }
}

/// Validated input for a new goal
#[derive(Debug)]
pub struct NewGoal {
    pub name: GoalName,
    pub target_amount: Amount,
    pub deadline: Option<NaiveDate>,
}

/// Goal repository
pub struct GoalRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> GoalRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i64, goal: NewGoal) -> Result<Goal, DbError> {
        let mut tx = self.pool.begin().await?;
        ensure_user(&mut tx, user_id).await?;

        let created: Goal = sqlx::query_as(&format!(
            r#"
            INSERT INTO goals (user_id, name, target_amount, deadline)
            VALUES ($1, $2, $3, $4)
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(goal.name.as_str())
        .bind(goal.target_amount.value())
        .bind(goal.deadline)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// List a user's goals (empty for unknown users).
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Goal>, DbError> {
        let goals = sqlx::query_as(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE user_id = $1 ORDER BY goal_id"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(goals)
    }

    /// Goals the user has not completed yet.
    pub async fn list_open_for_user(&self, user_id: i64) -> Result<Vec<Goal>, DbError> {
        let goals = sqlx::query_as(&format!(
            r#"
            SELECT {GOAL_COLUMNS}
            FROM goals
            WHERE user_id = $1 AND NOT is_completed
            ORDER BY goal_id
            "#
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(goals)
    }

    /// Add money to a goal (atomic).
    ///
    /// Completes the goal and pins `current_amount` at the target once the
    /// target is reached.
    pub async fn add_money(&self, goal_id: i64, amount: Amount) -> Result<Goal, DbError> {
        let mut tx = self.pool.begin().await?;

        let goal: Goal = sqlx::query_as(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE goal_id = $1 FOR UPDATE"
        ))
        .bind(goal_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("goal", goal_id))?;

        let funded = goal.balance().fund(amount, goal.target_amount);

        let updated: Goal = sqlx::query_as(&format!(
            r#"
            UPDATE goals
            SET current_amount = $2, is_completed = $3
            WHERE goal_id = $1
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(goal_id)
        .bind(funded.current_amount)
        .bind(funded.is_completed)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        if updated.is_completed && !goal.is_completed {
            tracing::info!(goal_id, user_id = updated.user_id, "Goal completed");
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::{NewUser, UserRepo};
    use crate::models::{Email, Password, Username};
    use rust_decimal_macros::dec;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn funding_pins_at_target() {
        let pool = crate::db::create_pool(&crate::DatabaseSettings::from_env())
            .await
            .expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");

        let tag = uuid::Uuid::new_v4().simple().to_string();
        let user = UserRepo::new(&pool)
            .create(NewUser {
                username: Username::new(&format!("saver-{tag}")).unwrap(),
                email: Email::new(&format!("saver-{tag}@example.com")).unwrap(),
                password: Password::new("secret").unwrap(),
            })
            .await
            .expect("user");

        let repo = GoalRepo::new(&pool);
        let goal = repo
            .create(
                user.user_id,
                NewGoal {
                    name: GoalName::new("Car").unwrap(),
                    target_amount: Amount::new("target_amount", dec!(100000)).unwrap(),
                    deadline: None,
                },
            )
            .await
            .expect("goal");

        let half = Amount::new("amount", dec!(50000)).unwrap();
        let more = Amount::new("amount", dec!(60000)).unwrap();
        repo.add_money(goal.goal_id, half).await.expect("first deposit");
        let funded = repo.add_money(goal.goal_id, more).await.expect("second deposit");

        assert_eq!(funded.current_amount, dec!(100000));
        assert!(funded.is_completed);

        let open = repo.list_open_for_user(user.user_id).await.expect("open goals");
        assert!(open.is_empty());
    }
}
