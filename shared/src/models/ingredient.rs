//! Ingredient and inventory ledger models

use serde::{Deserialize, Serialize};

/// Ingredient entity
///
/// `current_stock` never goes negative: deductions floor at zero. A clamped
/// deduction sets `over_consumed` so reporting can surface the silent
/// under-deduction; restocking clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub unit: String,
    pub current_stock: f64,
    pub min_stock: f64,
    pub cost_per_unit: Option<f64>,
    pub over_consumed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create ingredient payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    pub unit: String,
    pub current_stock: Option<f64>,
    pub min_stock: Option<f64>,
    pub cost_per_unit: Option<f64>,
}

/// Update ingredient payload (stock itself moves only through ledger ops)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub min_stock: Option<f64>,
    pub cost_per_unit: Option<f64>,
}

/// Inventory ledger entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum TransactionType {
    Purchase,
    Usage,
    Adjustment,
    Waste,
}

/// Ledger row joined with its ingredient (for audit listings)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryTransactionView {
    pub id: i64,
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub transaction_type: TransactionType,
    pub quantity: f64,
    pub cost_per_unit: Option<f64>,
    pub related_order_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Restock payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestockRequest {
    pub ingredient_id: i64,
    pub quantity: f64,
}

/// Wastage payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WastageRequest {
    pub ingredient_id: i64,
    pub quantity: f64,
    pub reason: Option<String>,
}

/// Spoilage payload (ingredient id comes from the path)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoilRequest {
    pub quantity: f64,
    pub reason: Option<String>,
}

/// Manual stock adjustment payload (signed delta)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustStockRequest {
    pub quantity_delta: f64,
    pub reason: Option<String>,
}
