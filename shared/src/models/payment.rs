//! Payment models

use serde::{Deserialize, Serialize};

/// Payment state; only `completed` payments count toward the paid total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// Payment entity (immutable once completed)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    /// Amount in currency unit
    pub amount: f64,
    /// cash, card, mobile, online, ...
    pub method: String,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub created_at: i64,
}

/// Record payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub amount: f64,
    pub method: String,
    pub transaction_id: Option<String>,
}

/// Response for a recorded payment: id plus the running paid total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: i64,
    pub total_paid: f64,
    pub order_status: super::OrderStatus,
}
