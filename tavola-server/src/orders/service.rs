//! Order lifecycle service
//!
//! Creation snapshots menu prices into the order, computes the monetary
//! breakdown on `Decimal`, and commits before any side effect runs.
//! Inventory deduction happens after the commit and is allowed to fail
//! without failing the order. Status changes go through the closed
//! transition table and publish to the kitchen feed after their own
//! commit.

use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, warn};

use shared::models::{
    Order, OrderCreate, OrderDetail, OrderItem, OrderItemStatus, OrderStatus, OrderType,
    TableStatus,
};
use shared::util::{now_millis, snowflake_id};
use shared::KitchenEventType;

use crate::db::repository::{dining_table, menu_item, order};
use crate::db::DbService;
use crate::inventory;
use crate::kitchen::KitchenFeed;
use crate::loyalty;
use crate::orders::money;
use crate::orders::status::{check_item_transition, check_transition};
use crate::utils::{AppError, AppResult};

/// Create an order with price snapshots and the 10% tax breakdown.
///
/// Dine-in orders must name an existing table, which is marked occupied in
/// the same transaction. Unavailable menu items are rejected up front;
/// inventory is not a gate. The order starts `pending`; the kitchen feed
/// gets its first `order_status` event once everything is durable.
pub async fn create_order(
    db: &DbService,
    feed: &KitchenFeed,
    req: &OrderCreate,
) -> AppResult<OrderDetail> {
    if req.items.is_empty() {
        return Err(AppError::validation(
            "Order must contain at least one item".to_string(),
        ));
    }
    for line in &req.items {
        if line.quantity < 1 {
            return Err(AppError::validation(format!(
                "Item quantity must be at least 1, got {}",
                line.quantity
            )));
        }
    }
    if req.order_type == OrderType::DineIn && req.table_id.is_none() {
        return Err(AppError::validation(
            "Dine-in orders require a table".to_string(),
        ));
    }

    let now = now_millis();
    let mut tx = db.pool.begin().await?;

    if let Some(table_id) = req.table_id {
        dining_table::find_by_id(&mut *tx, table_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {table_id} not found")))?;
    }

    let order_id = snowflake_id();
    let mut items = Vec::with_capacity(req.items.len());
    let mut total = Decimal::ZERO;
    for line in &req.items {
        let menu = menu_item::find_by_id(&mut *tx, line.menu_item_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Menu item {} not found", line.menu_item_id))
            })?;
        if !menu.is_available {
            return Err(AppError::validation(format!(
                "Menu item '{}' is not available",
                menu.name
            )));
        }
        total += money::to_decimal(menu.price) * Decimal::from(line.quantity);
        items.push(OrderItem {
            id: snowflake_id(),
            order_id,
            menu_item_id: menu.id,
            name: menu.name,
            quantity: line.quantity,
            price: menu.price,
            special_instructions: line.special_instructions.clone(),
            status: OrderItemStatus::Pending,
        });
    }

    let total = money::round2(total);
    let tax = money::round2(total * money::TAX_RATE);
    let final_amount = money::final_amount(total, tax, Decimal::ZERO);

    let new_order = Order {
        id: order_id,
        order_type: req.order_type,
        status: OrderStatus::Pending,
        customer_id: req.customer_id,
        table_id: req.table_id,
        notes: req.notes.clone(),
        total_amount: money::to_f64(total),
        tax_amount: money::to_f64(tax),
        discount_amount: 0.0,
        final_amount: money::to_f64(final_amount),
        inventory_deducted: false,
        loyalty_accrued: false,
        created_at: now,
        completed_at: None,
    };
    order::insert(&mut *tx, &new_order).await?;
    for item in &items {
        order::insert_item(&mut *tx, item).await?;
    }
    if req.order_type == OrderType::DineIn {
        if let Some(table_id) = req.table_id {
            dining_table::set_status(&mut *tx, table_id, TableStatus::Occupied).await?;
        }
    }
    tx.commit().await?;

    // The order is ground truth; a deduction failure is logged and the
    // unclaimed flag leaves it retryable.
    if let Err(err) = inventory::deduct_for_order(db, order_id).await {
        warn!(order_id, error = %err, "inventory deduction failed after order commit");
    }

    feed.publish(
        KitchenEventType::OrderStatus,
        json!({
            "order_id": order_id,
            "status": OrderStatus::Pending.as_str(),
            "previous": serde_json::Value::Null,
        }),
    );

    info!(
        order_id,
        order_type = ?req.order_type,
        items = items.len(),
        total = new_order.final_amount,
        "order created"
    );
    let order = order::find_by_id(db.pool(), order_id)
        .await?
        .ok_or_else(|| AppError::database("Order vanished after creation"))?;
    Ok(OrderDetail { order, items })
}

/// Order with its items.
pub async fn order_detail(db: &DbService, order_id: i64) -> AppResult<OrderDetail> {
    let order = order::find_by_id(db.pool(), order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
    let items = order::list_items(db.pool(), order_id).await?;
    Ok(OrderDetail { order, items })
}

/// Move an order through the lifecycle state machine.
///
/// Terminal transitions release the table while it is still occupied.
/// Explicit completion also triggers the at-most-once loyalty grant after
/// commit. The kitchen feed gets an `order_status` event once the change
/// is durable.
pub async fn set_status(
    db: &DbService,
    feed: &KitchenFeed,
    order_id: i64,
    new_status: OrderStatus,
) -> AppResult<Order> {
    let now = now_millis();
    let mut tx = db.pool.begin().await?;

    let current = order::find_by_id(&mut *tx, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
    check_transition(current.status, new_status)?;

    let completed_at = (new_status == OrderStatus::Completed).then_some(now);
    order::set_status(&mut *tx, order_id, new_status, completed_at).await?;
    if new_status.is_terminal() {
        if let Some(table_id) = current.table_id {
            // Release only while still occupied; a table reassigned to
            // reserved or cleaning keeps its state.
            let table = dining_table::find_by_id(&mut *tx, table_id).await?;
            if table.is_some_and(|t| t.status == TableStatus::Occupied) {
                dining_table::set_status(&mut *tx, table_id, TableStatus::Available).await?;
            }
        }
    }
    tx.commit().await?;

    if new_status == OrderStatus::Completed {
        // Accrual failure never rolls back the completion; the unclaimed
        // flag keeps it retryable.
        if let Err(err) = loyalty::grant_once(db, order_id).await {
            warn!(order_id, error = %err, "loyalty accrual failed after completion");
        }
    }

    feed.publish(
        KitchenEventType::OrderStatus,
        json!({
            "order_id": order_id,
            "status": new_status.as_str(),
            "previous": current.status.as_str(),
        }),
    );
    info!(
        order_id,
        from = current.status.as_str(),
        to = new_status.as_str(),
        "order status changed"
    );

    let order = order::find_by_id(db.pool(), order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
    Ok(order)
}

/// Move a single order item through its preparation states.
///
/// Items of terminal orders are frozen. When the change leaves every item
/// of the order done, the order auto-completes through [`set_status`]
/// (which handles table release, loyalty and the order-level event).
pub async fn set_item_status(
    db: &DbService,
    feed: &KitchenFeed,
    item_id: i64,
    new_status: OrderItemStatus,
) -> AppResult<OrderItem> {
    let mut tx = db.pool.begin().await?;

    let item = order::find_item(&mut *tx, item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order item {item_id} not found")))?;
    let parent = order::find_by_id(&mut *tx, item.order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", item.order_id)))?;
    if parent.status.is_terminal() {
        return Err(AppError::validation(format!(
            "Cannot update items of a {} order",
            parent.status.as_str()
        )));
    }
    check_item_transition(item.status, new_status)?;
    order::set_item_status(&mut *tx, item_id, new_status).await?;
    let siblings = order::list_items(&mut *tx, item.order_id).await?;
    tx.commit().await?;

    feed.publish(
        KitchenEventType::ItemStatus,
        json!({
            "order_id": item.order_id,
            "item_id": item_id,
            "status": new_status,
            "previous": item.status,
        }),
    );

    let all_done = siblings.iter().all(|i| i.status.is_done());
    if all_done {
        set_status(db, feed, item.order_id, OrderStatus::Completed).await?;
    }

    let updated = order::find_item(db.pool(), item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order item {item_id} not found")))?;
    Ok(updated)
}
