//! Recipe-driven inventory

mod engine;
mod resolver;

pub use engine::{adjust, deduct_for_order, record_waste, restock, spoil};
pub use resolver::{can_fulfill, Availability};
