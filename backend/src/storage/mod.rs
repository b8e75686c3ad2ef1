//! # Storage Module
//!
//! SQLite persistence for the ledger. Repositories implement the traits in
//! [`traits`] and are created through the [`Connection`] factory, so the
//! domain services never depend on SQL directly.
//!
//! Amounts are stored as integer cents and every table carries the owning
//! account id; all reads are scoped by it.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use traits::{AccountStorage, BudgetStorage, Connection, GoalStorage, TransactionStorage, UserStorage};
