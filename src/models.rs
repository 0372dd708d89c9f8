//! Record types for the finance tracker.
//!
//! This module contains the four persisted record sets (transactions,
//! budgets, goals, bills), the static category catalog, newtype ID
//! wrappers, and enumeration types for constrained values.

mod auth;
mod bill;
mod budget;
mod category;
mod enums;
mod goal;
mod ids;
mod transaction;

pub use auth::Credentials;
pub use bill::{Bill, NewBill};
pub use budget::{Budget, NewBudget};
pub use category::{Category, CategoryCatalog};
pub use enums::{CategoryIcon, Theme, TransactionType};
pub use goal::{Goal, NewGoal};
pub use ids::{BillId, BudgetId, CategoryId, GoalId, TransactionId};
pub use transaction::{
    MAX_AMOUNT, NewTransaction, Transaction, TransactionDraft, parse_amount, parse_date,
};

pub use chrono::NaiveDate;
