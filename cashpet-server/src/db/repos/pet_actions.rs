//! Pet action repository
//!
//! Recording an action locks the pet, applies the clamped stat deltas,
//! refreshes the feed/play timestamp and inserts the action row, all in one
//! transaction.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::pets::{Pet, PET_COLUMNS};
use super::DbError;
use crate::models::{ActionType, CareStamp, StatDeltas};

const ACTION_COLUMNS: &str = "action_id, pet_id, user_id, action_type, action_date, \
     happiness_change, health_change, hunger_change";

/// Pet action record from database
#[derive(Debug, Clone, FromRow)]
pub struct PetAction {
    pub action_id: i64,
    pub pet_id: i64,
    pub user_id: i64,
    pub action_type: String,
    pub action_date: DateTime<Utc>,
    pub happiness_change: i32,
    pub health_change: i32,
    pub hunger_change: i32,
}

/// Validated input for a new action
#[derive(Debug)]
pub struct NewPetAction {
    pub pet_id: i64,
    pub action_type: ActionType,
    pub deltas: StatDeltas,
}

/// Pet action repository
pub struct PetActionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PetActionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record an action and apply it to the pet (atomic).
    pub async fn create(&self, action: NewPetAction) -> Result<PetAction, DbError> {
        let mut tx = self.pool.begin().await?;

        let pet: Pet = sqlx::query_as(&format!(
            "SELECT {PET_COLUMNS} FROM pets WHERE pet_id = $1 FOR UPDATE"
        ))
        .bind(action.pet_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("pet", action.pet_id))?;

        let now = Utc::now();
        let stats = pet.stats().apply(action.deltas);
        let stamp = action.action_type.care_stamp();

        sqlx::query(
            r#"
            UPDATE pets SET
                health = $2,
                happiness = $3,
                hunger = $4,
                last_fed = CASE WHEN $5 THEN $7 ELSE last_fed END,
                last_played = CASE WHEN $6 THEN $7 ELSE last_played END
            WHERE pet_id = $1
            "#,
        )
        .bind(pet.pet_id)
        .bind(stats.health)
        .bind(stats.happiness)
        .bind(stats.hunger)
        .bind(stamp == Some(CareStamp::Fed))
        .bind(stamp == Some(CareStamp::Played))
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let created: PetAction = sqlx::query_as(&format!(
            r#"
            INSERT INTO pet_actions
                (pet_id, user_id, action_type, action_date,
                 happiness_change, health_change, hunger_change)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ACTION_COLUMNS}
            "#
        ))
        .bind(pet.pet_id)
        .bind(pet.user_id)
        .bind(action.action_type.as_str())
        .bind(now)
        .bind(action.deltas.happiness)
        .bind(action.deltas.health)
        .bind(action.deltas.hunger)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(
            pet_id = pet.pet_id,
            action = action.action_type.as_str(),
            health = stats.health,
            happiness = stats.happiness,
            hunger = stats.hunger,
            "Applied pet action"
        );
        Ok(created)
    }

    /// List actions for a pet, oldest first.
    pub async fn list_for_pet(&self, pet_id: i64) -> Result<Vec<PetAction>, DbError> {
        let actions = sqlx::query_as(&format!(
            "SELECT {ACTION_COLUMNS} FROM pet_actions WHERE pet_id = $1 ORDER BY action_id"
        ))
        .bind(pet_id)
        .fetch_all(self.pool)
        .await?;

        Ok(actions)
    }
}
