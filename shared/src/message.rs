//! Kitchen display event types
//!
//! Records appended to the in-process kitchen feed and delivered to
//! display clients over SSE. Memory-resident only; the sequence restarts
//! with the process.

use serde::{Deserialize, Serialize};

/// Kind of change a kitchen event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KitchenEventType {
    /// An order changed status.
    OrderStatus,
    /// A single order item changed status.
    ItemStatus,
}

impl KitchenEventType {
    pub fn as_str(self) -> &'static str {
        match self {
            KitchenEventType::OrderStatus => "order_status",
            KitchenEventType::ItemStatus => "item_status",
        }
    }
}

/// One entry in the kitchen feed.
///
/// `seq` increases monotonically per process and is what streaming
/// consumers use to resume without duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenEvent {
    pub seq: u64,
    pub event: KitchenEventType,
    pub payload: serde_json::Value,
    /// Milliseconds since epoch.
    pub timestamp: i64,
}
