//! Payment ledger integration tests

mod common;

use common::{approx_eq, seed, test_env};
use shared::models::{
    OrderCreate, OrderItemCreate, OrderStatus, OrderType, PaymentCreate, PaymentStatus,
};
use tavola_server::db::repository::order;
use tavola_server::{orders, payments, AppError};

fn takeaway_salad(s: &common::Seed) -> OrderCreate {
    OrderCreate {
        order_type: OrderType::Takeaway,
        customer_id: None,
        table_id: None,
        notes: None,
        items: vec![OrderItemCreate {
            menu_item_id: s.salad_id,
            quantity: 1,
            special_instructions: None,
        }],
    }
}

fn cash(amount: f64) -> PaymentCreate {
    PaymentCreate {
        amount,
        method: "cash".to_string(),
        transaction_id: None,
    }
}

#[tokio::test]
async fn partial_payment_keeps_order_pending() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    // Salad: total 10, tax 1, final 11
    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway_salad(&s))
        .await
        .expect("create order");

    let receipt = payments::record_payment(
        &env.state.db,
        &env.state.kitchen,
        detail.order.id,
        &cash(5.0),
    )
    .await
    .expect("partial payment");
    assert!(approx_eq(receipt.total_paid, 5.0));
    assert_eq!(receipt.order_status, OrderStatus::Pending);
}

#[tokio::test]
async fn reaching_final_amount_confirms_pending_order() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway_salad(&s))
        .await
        .expect("create order");

    payments::record_payment(
        &env.state.db,
        &env.state.kitchen,
        detail.order.id,
        &cash(5.0),
    )
    .await
    .expect("first half");
    let receipt = payments::record_payment(
        &env.state.db,
        &env.state.kitchen,
        detail.order.id,
        &cash(6.0),
    )
    .await
    .expect("second half");

    assert!(approx_eq(receipt.total_paid, 11.0));
    assert_eq!(receipt.order_status, OrderStatus::Confirmed);

    let updated = order::find_by_id(env.state.pool(), detail.order.id)
        .await
        .expect("query")
        .expect("order");
    assert_eq!(updated.status, OrderStatus::Confirmed);

    // The confirmation flip hit the kitchen feed
    let events = env.state.kitchen.events_after(0);
    assert!(events
        .iter()
        .any(|e| e.payload["status"] == "confirmed"
            && e.payload["order_id"] == detail.order.id));
}

#[tokio::test]
async fn payment_within_tolerance_counts_as_full() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway_salad(&s))
        .await
        .expect("create order");

    // Final is 11.00; one cent short still settles within tolerance
    let receipt = payments::record_payment(
        &env.state.db,
        &env.state.kitchen,
        detail.order.id,
        &cash(10.99),
    )
    .await
    .expect("pay");
    assert_eq!(receipt.order_status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn overpayment_is_kept_in_the_ledger() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway_salad(&s))
        .await
        .expect("create order");
    let receipt = payments::record_payment(
        &env.state.db,
        &env.state.kitchen,
        detail.order.id,
        &cash(20.0),
    )
    .await
    .expect("overpay");
    assert!(approx_eq(receipt.total_paid, 20.0));

    let rows = payments::list_for_order(&env.state.db, detail.order.id)
        .await
        .expect("list");
    assert_eq!(rows.len(), 1);
    assert!(approx_eq(rows[0].amount, 20.0));
    assert_eq!(rows[0].status, PaymentStatus::Completed);
}

#[tokio::test]
async fn payments_against_terminal_orders_are_rejected() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway_salad(&s))
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

    let err = payments::record_payment(
        &env.state.db,
        &env.state.kitchen,
        detail.order.id,
        &cash(11.0),
    )
    .await
    .expect_err("pay cancelled order");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn invalid_amounts_are_rejected() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    let detail = orders::create_order(&env.state.db, &env.state.kitchen, &takeaway_salad(&s))
        .await
        .expect("create order");

    for amount in [0.0, -5.0, f64::NAN, f64::INFINITY, 2_000_000.0] {
        let err = payments::record_payment(
            &env.state.db,
            &env.state.kitchen,
            detail.order.id,
            &cash(amount),
        )
        .await
        .expect_err("bad amount");
        assert!(matches!(err, AppError::Validation(_)));
    }

    let rows = payments::list_for_order(&env.state.db, detail.order.id)
        .await
        .expect("list");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let env = test_env().await;
    seed(&env.state).await;

    let err = payments::record_payment(&env.state.db, &env.state.kitchen, 12345, &cash(10.0))
        .await
        .expect_err("unknown order");
    assert!(matches!(err, AppError::NotFound(_)));
}
