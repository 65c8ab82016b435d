//! Menu item and recipe models

use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// Owned by menu management; the core reads it for price snapshots and the
/// manual availability flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Price in currency unit
    pub price: f64,
    /// Preparation time in minutes
    pub preparation_time: Option<i64>,
    pub is_available: bool,
    pub created_at: i64,
}

/// Per-unit ingredient requirement for one unit of a menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RecipeLine {
    pub menu_item_id: i64,
    pub ingredient_id: i64,
    pub quantity_required: f64,
}

/// Recipe line joined with its ingredient (for recipe listings)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RecipeLineView {
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub unit: String,
    pub quantity_required: f64,
}

/// An ingredient shortfall blocking a menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingIngredient {
    pub ingredient_id: i64,
    pub name: String,
    pub required: f64,
    pub available: f64,
}

/// Menu listing entry with effective availability
///
/// `is_available` here is the sellable flag gated by stock:
/// `manual flag AND recipe can be fulfilled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemAvailability {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub preparation_time: Option<i64>,
    pub is_available: bool,
    /// Whether current ingredient stock covers one serving
    pub inventory_available: bool,
    pub missing_ingredients: Vec<MissingIngredient>,
}
