//! Pet repository

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use super::users::ensure_user;
use super::DbError;
use crate::models::{PetName, PetStats, PetType};

pub(crate) const PET_COLUMNS: &str = "pet_id, user_id, name, pet_type, health, happiness, hunger, \
     created_at, last_fed, last_played";

/// Pet record from database
#[derive(Debug, Clone, FromRow)]
pub struct Pet {
    pub pet_id: i64,
    pub user_id: i64,
    pub name: String,
    pub pet_type: String,
    pub health: i32,
    pub happiness: i32,
    pub hunger: i32,
    pub created_at: NaiveDate,
    pub last_fed: Option<DateTime<Utc>>,
    pub last_played: Option<DateTime<Utc>>,
}

impl Pet {
    pub fn stats(&self) -> PetStats {
        PetStats {
            health: self.health,
            happiness: self.happiness,
            hunger: self.hunger,
        }
    }
}

/// Validated input for a new pet
#[derive(Debug)]
pub struct NewPet {
    pub name: PetName,
    pub pet_type: PetType,
}

/// Pet repository
pub struct PetRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PetRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Adopt a pet for `user_id` with default stats.
    pub async fn create(&self, user_id: i64, pet: NewPet) -> Result<Pet, DbError> {
        let mut tx = self.pool.begin().await?;
        ensure_user(&mut tx, user_id).await?;

        let stats = PetStats::default();
        let created: Pet = sqlx::query_as(&format!(
            r#"
            INSERT INTO pets (user_id, name, pet_type, health, happiness, hunger)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PET_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(pet.name.as_str())
        .bind(pet.pet_type.as_str())
        .bind(stats.health)
        .bind(stats.happiness)
        .bind(stats.hunger)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// List a user's pets (empty for unknown users).
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Pet>, DbError> {
        let pets = sqlx::query_as(&format!(
            "SELECT {PET_COLUMNS} FROM pets WHERE user_id = $1 ORDER BY pet_id"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(pets)
    }

    /// Get a single pet by id.
    pub async fn get(&self, pet_id: i64) -> Result<Pet, DbError> {
        sqlx::query_as(&format!("SELECT {PET_COLUMNS} FROM pets WHERE pet_id = $1"))
            .bind(pet_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("pet", pet_id))
    }
}
