//! # IO Module
//!
//! HTTP surface of the ledger. Handlers translate wire DTOs into domain
//! commands, call a service and translate the result or the
//! [`DomainError`](crate::domain::DomainError) back into a response.

pub mod rest;
