//! Conversions between the `shared` wire DTOs and domain types.
//!
//! Amounts cross this boundary as decimals on the wire and [`Money`] inside
//! the domain.
//!
//! [`Money`]: crate::domain::models::Money

pub mod account_mapper;
pub mod budget_mapper;
pub mod dashboard_mapper;
pub mod goal_mapper;
pub mod receipt_mapper;
pub mod transaction_mapper;
