//! # Domain Module
//!
//! Business rules of the family ledger, independent of HTTP and SQLite.
//!
//! ## Module Organization
//!
//! - **models**: accounts, members, ledger rows, budgets, goals and `Money`
//! - **split_allocator**: turns one shared entry into per-member ledger rows
//! - **aggregator**: totals, per-category and per-day flows for the dashboard
//! - **budget_tracker**: spending and status of a budget against the ledger
//! - **member_directory**: roster edits and name resolution on an account
//! - **receipt_parser**: heuristic transaction draft from receipt text
//! - **auth**: password hashing and signed bearer tokens
//! - **\*_service**: storage-backed operations used by the REST layer
//!
//! Engines are pure functions over models. Services are generic over
//! [`Connection`](crate::storage::Connection) so tests can run them against an
//! in-memory database.

pub mod account_service;
pub mod aggregator;
pub mod auth;
pub mod budget_service;
pub mod budget_tracker;
pub mod commands;
pub mod dashboard_service;
pub mod error;
pub mod goal_service;
pub mod member_directory;
pub mod models;
pub mod receipt_parser;
pub mod split_allocator;
pub mod transaction_service;
pub mod validation;

pub use account_service::AccountService;
pub use budget_service::BudgetService;
pub use dashboard_service::DashboardService;
pub use error::{DomainError, DomainResult};
pub use goal_service::GoalService;
pub use transaction_service::TransactionService;
