//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the shared pool; one connection or transaction per call
//! - Relies on UNIQUE constraints for uniqueness (no check-then-insert)
//! - Uses transactions for multi-step operations (ownership check + insert,
//!   read-modify-write of pet stats and goal balances)

pub mod users;
pub mod pets;
pub mod categories;
pub mod transactions;
pub mod budgets;
pub mod goals;
pub mod pet_actions;
pub mod summary;
pub mod maintenance;

pub use users::{NewUser, User, UserChanges, UserRepo};
pub use pets::{NewPet, Pet, PetRepo};
pub use categories::{Category, CategoryRepo, NewCategory};
pub use transactions::{NewTransaction, Transaction, TransactionRepo};
pub use budgets::{Budget, BudgetRepo, NewBudget};
pub use goals::{Goal, GoalRepo, NewGoal};
pub use pet_actions::{NewPetAction, PetAction, PetActionRepo};
pub use summary::SummaryRepo;
pub use maintenance::{MaintenanceRepo, SampleData, TableInfo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("forbidden: {reason}")]
    Forbidden { reason: &'static str },

    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error(transparent)]
    Validation(#[from] crate::models::ValidationError),

    #[error("{0}")]
    Hash(#[from] crate::auth::HashError),
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return Self::Conflict {
                    message: unique_violation_message(db.constraint()).to_owned(),
                };
            }
        }
        Self::Sqlx(e)
    }
}

/// User-facing message for a violated UNIQUE constraint.
fn unique_violation_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("users_username_unique") => "username already exists",
        Some("users_email_unique") => "email already exists",
        _ => "username or email already exists",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_messages() {
        assert_eq!(
            unique_violation_message(Some("users_email_unique")),
            "email already exists"
        );
        assert_eq!(
            unique_violation_message(Some("users_username_unique")),
            "username already exists"
        );
        assert_eq!(
            unique_violation_message(None),
            "username or email already exists"
        );
    }

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("goal", 42);
        assert_eq!(err.to_string(), "not found: goal '42'");
    }

    #[test]
    fn row_not_found_stays_sqlx() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(_)));
    }
}
