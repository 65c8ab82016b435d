//! Inventory deduction engine
//!
//! Every stock mutation runs inside one transaction together with its
//! ledger row, so the ledger can always recompute the level it explains.
//! Order deduction is idempotent per order (flag claim) and never fails
//! the order: stock floors at zero and the clamp is surfaced through the
//! ledger and the ingredient's `over_consumed` marker. Inventory is
//! advisory; order placement is authoritative.

use tracing::{debug, warn};

use shared::models::{
    AdjustStockRequest, Ingredient, RestockRequest, SpoilRequest, TransactionType, WastageRequest,
};
use shared::util::{now_millis, snowflake_id};

use crate::db::DbService;
use crate::db::repository::{ingredient, order, recipe};
use crate::utils::{AppError, AppResult};

/// Debit stock for every order item per its recipe and append `usage`
/// ledger rows referencing the order.
///
/// Returns `false` when this order was already deducted (re-invocation is
/// a no-op). Must run only after the order and its items are durably
/// created.
pub async fn deduct_for_order(db: &DbService, order_id: i64) -> AppResult<bool> {
    let now = now_millis();
    let mut tx = db.pool.begin().await?;

    if !order::claim_inventory_deduction(&mut *tx, order_id).await? {
        debug!(order_id, "inventory already deducted, skipping");
        return Ok(false);
    }

    let items = order::list_items(&mut *tx, order_id).await?;
    for item in &items {
        let lines = recipe::for_menu_item(&mut *tx, item.menu_item_id).await?;
        for line in lines {
            let Some(ing) = ingredient::find_by_id(&mut *tx, line.ingredient_id).await? else {
                continue;
            };
            let needed = line.quantity_required * item.quantity as f64;
            let clamped = needed > ing.current_stock;
            if clamped {
                warn!(
                    ingredient_id = ing.id,
                    needed,
                    available = ing.current_stock,
                    order_id,
                    "stock floor reached, deduction clamped at zero"
                );
            }
            let new_stock = (ing.current_stock - needed).max(0.0);
            ingredient::set_stock(&mut *tx, ing.id, new_stock, clamped.then_some(true), now)
                .await?;
            // Ledger row carries the full requested quantity, not the
            // clamped debit.
            let note = format!("Used for {} x {}", item.quantity, item.name);
            ingredient::insert_transaction(
                &mut *tx,
                snowflake_id(),
                ing.id,
                TransactionType::Usage,
                needed,
                Some(order_id),
                Some(&note),
                now,
            )
            .await?;
        }
    }

    tx.commit().await?;
    debug!(order_id, "inventory deducted");
    Ok(true)
}

/// Credit stock and append a `purchase` ledger row. Restocking clears the
/// over-consumed marker.
pub async fn restock(db: &DbService, req: &RestockRequest) -> AppResult<Ingredient> {
    if !req.quantity.is_finite() || req.quantity <= 0.0 {
        return Err(AppError::validation(format!(
            "Restock quantity must be positive, got {}",
            req.quantity
        )));
    }

    let now = now_millis();
    let mut tx = db.pool.begin().await?;

    let ing = ingredient::find_by_id(&mut *tx, req.ingredient_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Ingredient {} not found", req.ingredient_id)))?;

    ingredient::set_stock(
        &mut *tx,
        ing.id,
        ing.current_stock + req.quantity,
        Some(false),
        now,
    )
    .await?;
    ingredient::insert_transaction(
        &mut *tx,
        snowflake_id(),
        ing.id,
        TransactionType::Purchase,
        req.quantity,
        None,
        None,
        now,
    )
    .await?;

    let updated = ingredient::find_by_id(&mut *tx, ing.id)
        .await?
        .ok_or_else(|| AppError::database("Ingredient vanished during restock"))?;
    tx.commit().await?;
    Ok(updated)
}

/// Debit stock for wastage and append a `waste` ledger row. Like order
/// deduction this floors at zero; the shortfall stays visible in the
/// ledger and the over-consumed marker.
pub async fn record_waste(db: &DbService, req: &WastageRequest) -> AppResult<Ingredient> {
    if !req.quantity.is_finite() || req.quantity <= 0.0 {
        return Err(AppError::validation(format!(
            "Wastage quantity must be positive, got {}",
            req.quantity
        )));
    }

    let now = now_millis();
    let reason = req.reason.as_deref().unwrap_or("waste");
    let mut tx = db.pool.begin().await?;

    let ing = ingredient::find_by_id(&mut *tx, req.ingredient_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Ingredient {} not found", req.ingredient_id)))?;

    let clamped = req.quantity > ing.current_stock;
    let new_stock = (ing.current_stock - req.quantity).max(0.0);
    ingredient::set_stock(&mut *tx, ing.id, new_stock, clamped.then_some(true), now).await?;
    ingredient::insert_transaction(
        &mut *tx,
        snowflake_id(),
        ing.id,
        TransactionType::Waste,
        req.quantity,
        None,
        Some(reason),
        now,
    )
    .await?;

    let updated = ingredient::find_by_id(&mut *tx, ing.id)
        .await?
        .ok_or_else(|| AppError::database("Ingredient vanished during wastage"))?;
    tx.commit().await?;
    Ok(updated)
}

/// Spoil a portion of an ingredient. Unlike wastage, spoiling more than
/// the current stock is rejected: the spoiled portion physically exists.
pub async fn spoil(
    db: &DbService,
    ingredient_id: i64,
    req: &SpoilRequest,
) -> AppResult<Ingredient> {
    if !req.quantity.is_finite() || req.quantity <= 0.0 {
        return Err(AppError::validation(
            "Quantity must be greater than zero".to_string(),
        ));
    }

    let now = now_millis();
    let mut tx = db.pool.begin().await?;

    let ing = ingredient::find_by_id(&mut *tx, ingredient_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id} not found")))?;

    if req.quantity > ing.current_stock {
        return Err(AppError::insufficient(
            "Cannot spoil more than current stock".to_string(),
        ));
    }

    let reason = match req.reason.as_deref() {
        Some(r) if !r.trim().is_empty() => r,
        _ => "Spoiled",
    };

    ingredient::set_stock(&mut *tx, ing.id, ing.current_stock - req.quantity, None, now).await?;
    ingredient::insert_transaction(
        &mut *tx,
        snowflake_id(),
        ing.id,
        TransactionType::Waste,
        req.quantity,
        None,
        Some(reason),
        now,
    )
    .await?;

    let updated = ingredient::find_by_id(&mut *tx, ing.id)
        .await?
        .ok_or_else(|| AppError::database("Ingredient vanished during spoilage"))?;
    tx.commit().await?;
    Ok(updated)
}

/// Manual signed correction with an `adjustment` ledger row. The stock
/// level floors at zero like every other debit.
pub async fn adjust(
    db: &DbService,
    ingredient_id: i64,
    req: &AdjustStockRequest,
) -> AppResult<Ingredient> {
    if !req.quantity_delta.is_finite() || req.quantity_delta == 0.0 {
        return Err(AppError::validation(
            "Adjustment delta must be a non-zero number".to_string(),
        ));
    }

    let now = now_millis();
    let mut tx = db.pool.begin().await?;

    let ing = ingredient::find_by_id(&mut *tx, ingredient_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id} not found")))?;

    let new_stock = (ing.current_stock + req.quantity_delta).max(0.0);
    ingredient::set_stock(&mut *tx, ing.id, new_stock, None, now).await?;
    ingredient::insert_transaction(
        &mut *tx,
        snowflake_id(),
        ing.id,
        TransactionType::Adjustment,
        req.quantity_delta,
        None,
        req.reason.as_deref(),
        now,
    )
    .await?;

    let updated = ingredient::find_by_id(&mut *tx, ing.id)
        .await?
        .ok_or_else(|| AppError::database("Ingredient vanished during adjustment"))?;
    tx.commit().await?;
    Ok(updated)
}
