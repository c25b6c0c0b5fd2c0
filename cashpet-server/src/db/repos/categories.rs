//! Category repository and the category ownership rule
//!
//! Transactions and budgets may only reference categories owned by the same
//! user. `ensure_owned_category` enforces that inside the caller's transaction.

use sqlx::{FromRow, PgConnection, PgPool};

use super::users::ensure_user;
use super::DbError;
use crate::models::{CategoryKind, CategoryName};

/// Category record from database
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub category_id: i64,
    pub user_id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
}

/// Validated input for a new category
#[derive(Debug)]
pub struct NewCategory {
    pub name: CategoryName,
    pub kind: CategoryKind,
    pub description: Option<String>,
}

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i64, category: NewCategory) -> Result<Category, DbError> {
        let mut tx = self.pool.begin().await?;
        ensure_user(&mut tx, user_id).await?;

        let created: Category = sqlx::query_as(
            r#"
            INSERT INTO categories (user_id, name, type, description)
            VALUES ($1, $2, $3, $4)
            RETURNING category_id, user_id, name, type, description
            "#,
        )
        .bind(user_id)
        .bind(category.name.as_str())
        .bind(category.kind.as_str())
        .bind(category.description.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// List a user's categories (empty for unknown users).
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Category>, DbError> {
        let categories = sqlx::query_as(
            r#"
            SELECT category_id, user_id, name, type, description
            FROM categories
            WHERE user_id = $1
            ORDER BY category_id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }
}

/// Fail unless `category_id` exists (`NotFound`) and belongs to `user_id`
/// (`Forbidden`).
pub(crate) async fn ensure_owned_category(
    conn: &mut PgConnection,
    user_id: i64,
    category_id: i64,
) -> Result<(), DbError> {
    let owner: Option<i64> =
        sqlx::query_scalar("SELECT user_id FROM categories WHERE category_id = $1")
            .bind(category_id)
            .fetch_optional(&mut *conn)
            .await?;

    check_owner(owner, user_id, category_id)
}

fn check_owner(owner: Option<i64>, user_id: i64, category_id: i64) -> Result<(), DbError> {
    match owner {
        None => Err(DbError::not_found("category", category_id)),
        Some(owner) if owner != user_id => Err(DbError::Forbidden {
            reason: "category does not belong to user",
        }),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_category_is_not_found() {
        let err = check_owner(None, 1, 9).unwrap_err();
        assert!(matches!(
            err,
            DbError::NotFound { resource: "category", ref id } if id == "9"
        ));
    }

    #[test]
    fn foreign_category_is_forbidden() {
        let err = check_owner(Some(2), 1, 9).unwrap_err();
        assert!(matches!(err, DbError::Forbidden { .. }));
    }

    #[test]
    fn own_category_passes() {
        assert!(check_owner(Some(1), 1, 9).is_ok());
    }
}
