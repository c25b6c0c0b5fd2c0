//! Route handlers organized by resource

pub mod root;
pub mod health;
pub mod database;
pub mod users;
pub mod pets;
pub mod categories;
pub mod transactions;
pub mod budgets;
pub mod goals;
pub mod pet_actions;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support;
