//! Shared types for the Tavola restaurant service
//!
//! Data models, loyalty tier math and kitchen event types used by the
//! server and its clients. DB row types gate their `sqlx` derives behind
//! the `db` feature so this crate stays I/O-free by default.

pub mod loyalty;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use loyalty::LoyaltyTier;
pub use message::{KitchenEvent, KitchenEventType};
