//! Pet stats and care actions
//!
//! A pet has three stats, each kept in `0..=100`. Care actions carry signed
//! deltas that are added to the current stats and clamped back into range.

use super::validation::bounded_text;
use super::ValidationError;

const MAX_PET_NAME_LEN: usize = 50;
const MAX_PET_TYPE_LEN: usize = 20;
const MAX_ACTION_TYPE_LEN: usize = 20;

/// Lowest value any stat can take
pub const STAT_MIN: i32 = 0;
/// Highest value any stat can take
pub const STAT_MAX: i32 = 100;

/// Validated pet name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetName(String);

impl PetName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text("pet name", s, MAX_PET_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form species (cat, dog, dragon, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetType(String);

impl PetType {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text("pet type", s, MAX_PET_TYPE_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which care timestamp an action refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareStamp {
    Fed,
    Played,
}

/// Validated action type. Any label is accepted; `feed` and `play` also
/// refresh the pet's care timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionType(String);

impl ActionType {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text("action type", s, MAX_ACTION_TYPE_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn care_stamp(&self) -> Option<CareStamp> {
        match self.0.as_str() {
            "feed" => Some(CareStamp::Fed),
            "play" => Some(CareStamp::Played),
            _ => None,
        }
    }
}

/// Signed stat changes carried by an action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatDeltas {
    pub health: i32,
    pub happiness: i32,
    pub hunger: i32,
}

/// Current pet stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetStats {
    pub health: i32,
    pub happiness: i32,
    pub hunger: i32,
}

impl Default for PetStats {
    /// A freshly adopted pet: healthy, happy, not hungry.
    fn default() -> Self {
        Self {
            health: STAT_MAX,
            happiness: STAT_MAX,
            hunger: STAT_MIN,
        }
    }
}

impl PetStats {
    /// Add `deltas` and clamp every stat into `0..=100`.
    ///
    /// # Example
    /// ```
    /// use cashpet_server::models::{PetStats, StatDeltas};
    ///
    /// let stats = PetStats { health: 50, happiness: 95, hunger: 10 };
    /// let next = stats.apply(StatDeltas { happiness: 50, ..Default::default() });
    /// assert_eq!(next.happiness, 100);
    /// ```
    pub fn apply(self, deltas: StatDeltas) -> Self {
        Self {
            health: clamp_stat(self.health, deltas.health),
            happiness: clamp_stat(self.happiness, deltas.happiness),
            hunger: clamp_stat(self.hunger, deltas.hunger),
        }
    }
}

fn clamp_stat(current: i32, delta: i32) -> i32 {
    current.saturating_add(delta).clamp(STAT_MIN, STAT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pet_defaults() {
        let stats = PetStats::default();
        assert_eq!(stats.health, 100);
        assert_eq!(stats.happiness, 100);
        assert_eq!(stats.hunger, 0);
    }

    #[test]
    fn clamps_upper_bound() {
        let stats = PetStats {
            health: 80,
            happiness: 95,
            hunger: 10,
        };
        let next = stats.apply(StatDeltas {
            happiness: 50,
            ..Default::default()
        });
        assert_eq!(next.happiness, 100);
        assert_eq!(next.health, 80);
        assert_eq!(next.hunger, 10);
    }

    #[test]
    fn clamps_lower_bound() {
        let stats = PetStats {
            health: 5,
            happiness: 5,
            hunger: 5,
        };
        let next = stats.apply(StatDeltas {
            health: -50,
            happiness: -6,
            hunger: -5,
        });
        assert_eq!(next, PetStats { health: 0, happiness: 0, hunger: 0 });
    }

    #[test]
    fn extreme_deltas_stay_in_range() {
        let stats = PetStats::default();
        for delta in [i32::MIN, -101, -1, 0, 1, 101, i32::MAX] {
            let next = stats.apply(StatDeltas {
                health: delta,
                happiness: delta,
                hunger: delta,
            });
            for stat in [next.health, next.happiness, next.hunger] {
                assert!((STAT_MIN..=STAT_MAX).contains(&stat), "{} out of range", stat);
            }
        }
    }

    #[test]
    fn care_stamps() {
        assert_eq!(ActionType::new("feed").unwrap().care_stamp(), Some(CareStamp::Fed));
        assert_eq!(ActionType::new("play").unwrap().care_stamp(), Some(CareStamp::Played));
        assert_eq!(ActionType::new("heal").unwrap().care_stamp(), None);
    }

    #[test]
    fn name_and_type_limits() {
        assert!(PetName::new("Barsik").is_ok());
        assert!(PetName::new("").is_err());
        assert!(PetType::new(&"d".repeat(21)).is_err());
        assert!(ActionType::new(" ").is_err());
    }
}
