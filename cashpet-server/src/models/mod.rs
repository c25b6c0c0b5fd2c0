//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod money;
pub mod user;
pub mod category;
pub mod period;
pub mod pet;
pub mod goal;
pub mod summary;

pub use validation::ValidationError;
pub use money::Amount;
pub use user::{Email, Password, Username};
pub use category::{CategoryKind, CategoryName, MAX_DESCRIPTION_LEN};
pub use period::{DateRange, Period};
pub use pet::{ActionType, CareStamp, PetName, PetStats, PetType, StatDeltas};
pub use goal::{progress_percentage, GoalBalance, GoalName};
pub use summary::{FinancialSummary, GoalProgress};

pub(crate) use validation::optional_text;
