//! Order models

use serde::{Deserialize, Serialize};

/// Order channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderType {
    #[serde(rename = "dine-in")]
    #[cfg_attr(feature = "db", sqlx(rename = "dine-in"))]
    DineIn,
    Takeaway,
    Delivery,
}

/// Order lifecycle state
///
/// `pending -> confirmed -> cooking -> ready -> served -> completed`;
/// `cancelled` is reachable from any non-terminal state. `completed` and
/// `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cooking,
    Ready,
    Served,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cooking => "cooking",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Order item preparation state
///
/// Items cycle `pending -> cooking -> ready -> served`; `completed` is an
/// accepted synonym for fully done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderItemStatus {
    Pending,
    Cooking,
    Ready,
    Served,
    Completed,
}

impl OrderItemStatus {
    /// Served and completed both count as fully done.
    pub fn is_done(self) -> bool {
        matches!(self, OrderItemStatus::Served | OrderItemStatus::Completed)
    }
}

/// Order entity
///
/// Monetary invariant: `final_amount == max(0, total + tax - discount)`
/// (2 decimal places). `inventory_deducted` and `loyalty_accrued` are the
/// per-order idempotency flags for stock deduction and point accrual.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub customer_id: Option<i64>,
    pub table_id: Option<i64>,
    pub notes: Option<String>,
    /// Sum of item price snapshots, in currency unit
    pub total_amount: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub final_amount: f64,
    pub inventory_deducted: bool,
    pub loyalty_accrued: bool,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

/// Order item with price snapshot
///
/// `name` and `price` are copied from the menu item at order time and
/// never re-read (price stability contract).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i64,
    /// Unit price snapshot in currency unit
    pub price: f64,
    pub special_instructions: Option<String>,
    pub status: OrderItemStatus,
}

/// Order with its items (detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub order_type: OrderType,
    pub customer_id: Option<i64>,
    pub table_id: Option<i64>,
    pub notes: Option<String>,
    pub items: Vec<OrderItemCreate>,
}

/// Item line of a create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemCreate {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub special_instructions: Option<String>,
}

/// Status patch payload for an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Status patch payload for an order item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemStatusUpdate {
    pub status: OrderItemStatus,
}
