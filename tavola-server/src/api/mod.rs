//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`orders`] - order lifecycle, payments and loyalty redemption
//! - [`kitchen`] - kitchen display: item states, active orders, SSE feed
//! - [`inventory`] - ingredients and the stock ledger
//! - [`menu`] - menu listing with effective availability
//! - [`customers`] - customer accounts and loyalty balances
//! - [`tables`] - dining table management

pub mod customers;
pub mod health;
pub mod inventory;
pub mod kitchen;
pub mod menu;
pub mod orders;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
