//! Personal finance tracker core.
//!
//! This crate keeps transactions, category budgets, savings goals and bill
//! reminders in a [`store::RecordStore`] that mirrors every change to a
//! pluggable [`storage::Storage`] backend, and derives dashboards, bill
//! notifications and period reports from them.

pub mod aggregate;
pub mod error;
pub mod format;
pub mod models;
pub mod notifications;
pub mod report;
pub mod storage;
pub mod store;
