//! Order lifecycle and inventory deduction integration tests

mod common;

use common::{approx_eq, seed, test_env};
use shared::models::{
    OrderCreate, OrderItemCreate, OrderItemStatus, OrderStatus, OrderType, TableStatus,
    TransactionType,
};
use tavola_server::db::repository::{dining_table, ingredient, order};
use tavola_server::{inventory, orders, AppError};

fn takeaway(menu_item_id: i64, quantity: i64) -> OrderCreate {
    OrderCreate {
        order_type: OrderType::Takeaway,
        customer_id: None,
        table_id: None,
        notes: None,
        items: vec![OrderItemCreate {
            menu_item_id,
            quantity,
            special_instructions: None,
        }],
    }
}

#[tokio::test]
async fn order_totals_carry_ten_percent_tax() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway(s.pizza_id, 1))
        .await
        .expect("create order");

    assert!(approx_eq(detail.order.total_amount, 25.0));
    assert!(approx_eq(detail.order.tax_amount, 2.5));
    assert!(approx_eq(detail.order.discount_amount, 0.0));
    assert!(approx_eq(detail.order.final_amount, 27.5));
    assert_eq!(detail.order.status, OrderStatus::Pending);
    assert_eq!(detail.items.len(), 1);
    // Price snapshot copied from the menu
    assert!(approx_eq(detail.items[0].price, 25.0));
}

#[tokio::test]
async fn deduction_debits_recipe_and_records_usage() {
    // Flour starts at 10kg; 10 pizzas need 3kg
    let env = test_env().await;
    let s = seed(&env.state).await;

    orders::create_order(&env.state.db, &env.state.kitchen, &takeaway(s.pizza_id, 10))
        .await
        .expect("create order");

    let flour = ingredient::find_by_id(env.state.pool(), s.flour_id)
        .await
        .expect("query")
        .expect("flour");
    assert!(approx_eq(flour.current_stock, 7.0));
    assert!(!flour.over_consumed);

    let usage = ingredient::list_transactions_by_type(env.state.pool(), TransactionType::Usage)
        .await
        .expect("ledger");
    let flour_rows: Vec<_> = usage
        .iter()
        .filter(|t| t.ingredient_id == s.flour_id)
        .collect();
    assert_eq!(flour_rows.len(), 1);
    assert!(approx_eq(flour_rows[0].quantity, 3.0));
    assert!(flour_rows[0].related_order_id.is_some());
}

#[tokio::test]
async fn deduction_is_idempotent_per_order() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway(s.pizza_id, 2))
        .await
        .expect("create order");

    // create_order already deducted; direct re-invocations are no-ops
    let again = inventory::deduct_for_order(&env.state.db, detail.order.id)
        .await
        .expect("second call");
    assert!(!again);
    let third = inventory::deduct_for_order(&env.state.db, detail.order.id)
        .await
        .expect("third call");
    assert!(!third);

    let flour = ingredient::find_by_id(env.state.pool(), s.flour_id)
        .await
        .expect("query")
        .expect("flour");
    assert!(approx_eq(flour.current_stock, 10.0 - 0.6));
}

#[tokio::test]
async fn create_order_validations() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let empty = OrderCreate {
        items: vec![],
        ..takeaway(s.pizza_id, 1)
    };
    let err = orders::create_order(&env.state.db, &env.state.kitchen, &empty)
        .await
        .expect_err("empty order");
    assert!(matches!(err, AppError::Validation(_)));

    let err = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway(s.pizza_id, 0))
        .await
        .expect_err("zero quantity");
    assert!(matches!(err, AppError::Validation(_)));

    let err = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway(999_999, 1))
        .await
        .expect_err("unknown menu item");
    assert!(matches!(err, AppError::NotFound(_)));

    let dine_in_no_table = OrderCreate {
        order_type: OrderType::DineIn,
        ..takeaway(s.pizza_id, 1)
    };
    let err = orders::create_order(&env.state.db, &env.state.kitchen, &dine_in_no_table)
        .await
        .expect_err("dine-in without table");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn transition_table_is_enforced() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway(s.salad_id, 1))
        .await
        .expect("create order");
    let id = detail.order.id;

    // Skipping ahead is rejected
    let err = orders::set_status(&env.state.db, &env.state.kitchen, id, OrderStatus::Cooking)
        .await
        .expect_err("pending -> cooking");
    assert!(matches!(err, AppError::Validation(_)));

    // The sequential path works
    for next in [
        OrderStatus::Confirmed,
        OrderStatus::Cooking,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Completed,
    ] {
        orders::set_status(&env.state.db, &env.state.kitchen, id, next)
            .await
            .expect("sequential transition");
    }

    // Terminal orders accept nothing
    let err = orders::set_status(&env.state.db, &env.state.kitchen, id, OrderStatus::Cancelled)
        .await
        .expect_err("completed -> cancelled");
    assert!(matches!(err, AppError::Validation(_)));

    let completed = order::find_by_id(env.state.pool(), id)
        .await
        .expect("query")
        .expect("order");
    assert!(completed.completed_at.is_some());
}

#[tokio::test]
async fn serving_all_items_auto_completes_and_frees_table() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let payload = OrderCreate {
        order_type: OrderType::DineIn,
        customer_id: None,
        table_id: Some(s.table_id),
        notes: None,
        items: vec![
            OrderItemCreate {
                menu_item_id: s.pizza_id,
                quantity: 1,
                special_instructions: None,
            },
            OrderItemCreate {
                menu_item_id: s.salad_id,
                quantity: 2,
                special_instructions: None,
            },
        ],
    };
    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &payload)
        .await
        .expect("create order");

    let table = dining_table::find_by_id(env.state.pool(), s.table_id)
        .await
        .expect("query")
        .expect("table");
    assert_eq!(table.status, TableStatus::Occupied);

    for item in &detail.items {
        orders::set_item_status(
            &env.state.db,
            &env.state.kitchen,
            item.id,
            OrderItemStatus::Served,
        )
        .await
        .expect("serve item");
    }

    let completed = order::find_by_id(env.state.pool(), detail.order.id)
        .await
        .expect("query")
        .expect("order");
    assert_eq!(completed.status, OrderStatus::Completed);
    assert!(completed.completed_at.is_some());

    let table = dining_table::find_by_id(env.state.pool(), s.table_id)
        .await
        .expect("query")
        .expect("table");
    assert_eq!(table.status, TableStatus::Available);
}

#[tokio::test]
async fn cancellation_keeps_reassigned_table_status() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let payload = OrderCreate {
        order_type: OrderType::DineIn,
        table_id: Some(s.table_id),
        ..takeaway(s.pizza_id, 1)
    };
    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &payload)
        .await
        .expect("create order");

    // Staff flips the table to cleaning while the order is still open
    dining_table::set_status(env.state.pool(), s.table_id, TableStatus::Cleaning)
        .await
        .expect("mark cleaning");

    orders::set_status(
        &env.state.db,
        &env.state.kitchen,
        detail.order.id,
        OrderStatus::Cancelled,
    )
    .await
    .expect("cancel");

    let table = dining_table::find_by_id(env.state.pool(), s.table_id)
        .await
        .expect("query")
        .expect("table");
    assert_eq!(table.status, TableStatus::Cleaning);
}

#[tokio::test]
async fn item_updates_on_terminal_orders_are_rejected() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway(s.salad_id, 1))
        .await
        .expect("create order");
    orders::set_status(
        &env.state.db,
        &env.state.kitchen,
        detail.order.id,
        OrderStatus::Cancelled,
    )
    .await
    .expect("cancel");

    let err = orders::set_item_status(
        &env.state.db,
        &env.state.kitchen,
        detail.items[0].id,
        OrderItemStatus::Cooking,
    )
    .await
    .expect_err("item of cancelled order");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn status_changes_publish_kitchen_events_in_order() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway(s.salad_id, 1))
        .await
        .expect("create order");
    orders::set_status(
        &env.state.db,
        &env.state.kitchen,
        detail.order.id,
        OrderStatus::Confirmed,
    )
    .await
    .expect("confirm");
    orders::set_item_status(
        &env.state.db,
        &env.state.kitchen,
        detail.items[0].id,
        OrderItemStatus::Cooking,
    )
    .await
    .expect("start cooking");

    let events = env.state.kitchen.events_after(0);
    assert_eq!(events.len(), 3);
    let seqs: Vec<u64> = events.iter().map(|e| e.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3]);
    assert_eq!(events[1].payload["status"], "confirmed");
    assert_eq!(events[2].payload["status"], "cooking");
}
