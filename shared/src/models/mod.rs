//! Data models
//!
//! Shared between tavola-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are
//! milliseconds since epoch.

pub mod customer;
pub mod dining_table;
pub mod ingredient;
pub mod menu_item;
pub mod order;
pub mod payment;

// Re-exports
pub use customer::*;
pub use dining_table::*;
pub use ingredient::*;
pub use menu_item::*;
pub use order::*;
pub use payment::*;
