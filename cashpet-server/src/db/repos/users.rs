//! User repository
//!
//! - create/update: rely on UNIQUE(username), UNIQUE(email); violations
//!   surface as `DbError::Conflict`
//! - delete: owned rows go with the user via ON DELETE CASCADE

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgConnection, PgPool};

use super::DbError;
use crate::auth::hash_password;
use crate::models::{Email, Password, Username};

const USER_COLUMNS: &str =
    "user_id, username, email, password_hash, registration_date, last_login, is_active";

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub registration_date: NaiveDate,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Validated input for a new user
#[derive(Debug)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub password: Password,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<Username>,
    pub email: Option<Email>,
    pub password: Option<Password>,
    pub is_active: Option<bool>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a user, hashing the password.
    pub async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let password_hash = hash_password(user.password).await?;

        let created: User = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&password_hash)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(user_id = created.user_id, "Created user");
        Ok(created)
    }

    /// List all users ordered by id.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY user_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Get a single user by id.
    pub async fn get(&self, user_id: i64) -> Result<User, DbError> {
        sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("user", user_id))
    }

    /// Apply a partial update in a single statement.
    pub async fn update(&self, user_id: i64, changes: UserChanges) -> Result<User, DbError> {
        let password_hash = match changes.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        sqlx::query_as(&format!(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                is_active = COALESCE($5, is_active)
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(changes.username.as_ref().map(Username::as_str))
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(password_hash)
        .bind(changes.is_active)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("user", user_id))
    }

    /// Delete a user and, through cascades, everything they own.
    pub async fn delete(&self, user_id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("user", user_id));
        }

        tracing::info!(user_id, "Deleted user");
        Ok(())
    }
}

/// Fail with `NotFound` unless the user exists.
///
/// Takes a connection so callers can run it inside their transaction.
pub(crate) async fn ensure_user(conn: &mut PgConnection, user_id: i64) -> Result<(), DbError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

    if exists {
        Ok(())
    } else {
        Err(DbError::not_found("user", user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p cashpet-server -- --ignored

    async fn test_pool() -> PgPool {
        let pool = crate::db::create_pool(&crate::DatabaseSettings::from_env())
            .await
            .expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    fn new_user(tag: &str) -> NewUser {
        NewUser {
            username: Username::new(&format!("user-{tag}")).unwrap(),
            email: Email::new(&format!("{tag}@example.com")).unwrap(),
            password: Password::new("secret").unwrap(),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_email_conflicts_and_first_survives() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);
        let tag = uuid::Uuid::new_v4().simple().to_string();

        let first = repo.create(new_user(&tag)).await.expect("first insert");

        let mut second = new_user(&tag);
        second.username = Username::new(&format!("other-{tag}")).unwrap();
        let err = repo.create(second).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));

        let reloaded = repo.get(first.user_id).await.expect("first user still there");
        assert_eq!(reloaded.email, first.email);
        assert_ne!(reloaded.password_hash, "secret");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_and_delete() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);
        let tag = uuid::Uuid::new_v4().simple().to_string();
        let user = repo.create(new_user(&tag)).await.expect("insert");

        let updated = repo
            .update(
                user.user_id,
                UserChanges {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        assert!(!updated.is_active);
        assert_eq!(updated.username, user.username);

        repo.delete(user.user_id).await.expect("delete");
        assert!(matches!(
            repo.get(user.user_id).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(user.user_id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
