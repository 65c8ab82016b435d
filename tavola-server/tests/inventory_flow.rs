//! Inventory ledger integration tests

mod common;

use common::{approx_eq, seed, seed_ingredient, test_env};
use shared::models::{
    AdjustStockRequest, OrderCreate, OrderItemCreate, OrderType, RestockRequest, SpoilRequest,
    TransactionType, WastageRequest,
};
use tavola_server::db::repository::ingredient;
use tavola_server::{inventory, orders, AppError};

#[tokio::test]
async fn spoiling_more_than_stock_is_rejected() {
    let env = test_env().await;
    let id = seed_ingredient(&env.state, "Basil", "kg", 5.0, 1.0).await;

    let err = inventory::spoil(
        &env.state.db,
        id,
        &SpoilRequest {
            quantity: 10.0,
            reason: None,
        },
    )
    .await
    .expect_err("overspoil");
    assert!(matches!(err, AppError::InsufficientBalance(_)));

    // Nothing moved, nothing logged
    let unchanged = ingredient::find_by_id(env.state.pool(), id)
        .await
        .expect("query")
        .expect("ingredient");
    assert!(approx_eq(unchanged.current_stock, 5.0));
    let ledger = ingredient::list_transactions(env.state.pool())
        .await
        .expect("ledger");
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn spoil_debits_and_records_waste() {
    let env = test_env().await;
    let id = seed_ingredient(&env.state, "Basil", "kg", 5.0, 1.0).await;

    let updated = inventory::spoil(
        &env.state.db,
        id,
        &SpoilRequest {
            quantity: 2.0,
            reason: Some("freezer failure".to_string()),
        },
    )
    .await
    .expect("spoil");
    assert!(approx_eq(updated.current_stock, 3.0));

    let waste = ingredient::list_transactions_by_type(env.state.pool(), TransactionType::Waste)
        .await
        .expect("ledger");
    assert_eq!(waste.len(), 1);
    assert!(approx_eq(waste[0].quantity, 2.0));
    assert_eq!(waste[0].notes.as_deref(), Some("freezer failure"));
}

#[tokio::test]
async fn wastage_floors_at_zero_and_marks_over_consumption() {
    let env = test_env().await;
    let id = seed_ingredient(&env.state, "Cream", "l", 5.0, 1.0).await;

    let updated = inventory::record_waste(
        &env.state.db,
        &WastageRequest {
            ingredient_id: id,
            quantity: 7.0,
            reason: None,
        },
    )
    .await
    .expect("waste");
    assert!(approx_eq(updated.current_stock, 0.0));
    assert!(updated.over_consumed);

    // The ledger keeps the full requested quantity
    let waste = ingredient::list_transactions_by_type(env.state.pool(), TransactionType::Waste)
        .await
        .expect("ledger");
    assert!(approx_eq(waste[0].quantity, 7.0));
}

#[tokio::test]
async fn restock_credits_stock_and_clears_over_consumption() {
    let env = test_env().await;
    let id = seed_ingredient(&env.state, "Cream", "l", 1.0, 1.0).await;

    inventory::record_waste(
        &env.state.db,
        &WastageRequest {
            ingredient_id: id,
            quantity: 3.0,
            reason: None,
        },
    )
    .await
    .expect("waste");

    let updated = inventory::restock(
        &env.state.db,
        &RestockRequest {
            ingredient_id: id,
            quantity: 8.0,
        },
    )
    .await
    .expect("restock");
    assert!(approx_eq(updated.current_stock, 8.0));
    assert!(!updated.over_consumed);

    let purchases =
        ingredient::list_transactions_by_type(env.state.pool(), TransactionType::Purchase)
            .await
            .expect("ledger");
    assert_eq!(purchases.len(), 1);
    assert!(approx_eq(purchases[0].quantity, 8.0));
}

#[tokio::test]
async fn restock_rejects_non_positive_quantities() {
    let env = test_env().await;
    let id = seed_ingredient(&env.state, "Cream", "l", 1.0, 1.0).await;

    for qty in [0.0, -2.0, f64::NAN] {
        let err = inventory::restock(
            &env.state.db,
            &RestockRequest {
                ingredient_id: id,
                quantity: qty,
            },
        )
        .await
        .expect_err("bad quantity");
        assert!(matches!(err, AppError::Validation(_)));
    }
}

#[tokio::test]
async fn order_deduction_clamps_and_flags_over_consumption() {
    let env = test_env().await;
    let s = seed(&env.state).await;

    // 20 pizzas need 6kg flour against 10kg, and 4kg cheese against 5kg;
    // run it twice to overshoot flour on the second order
    for _ in 0..2 {
        orders::create_order(
            &env.state.db,
            &env.state.kitchen,
            &OrderCreate {
                order_type: OrderType::Takeaway,
                customer_id: None,
                table_id: None,
                notes: None,
                items: vec![OrderItemCreate {
                    menu_item_id: s.pizza_id,
                    quantity: 20,
                    special_instructions: None,
                }],
            },
        )
        .await
        .expect("create order");
    }

    let flour = ingredient::find_by_id(env.state.pool(), s.flour_id)
        .await
        .expect("query")
        .expect("flour");
    // 10 - 6 - 6 clamps at zero
    assert!(approx_eq(flour.current_stock, 0.0));
    assert!(flour.over_consumed);

    let cheese = ingredient::find_by_id(env.state.pool(), s.cheese_id)
        .await
        .expect("query")
        .expect("cheese");
    // 5 - 4 - 4 clamps at zero too
    assert!(approx_eq(cheese.current_stock, 0.0));
    assert!(cheese.over_consumed);

    // Both usage rows carry the full requested 6kg of flour
    let usage = ingredient::list_transactions_by_type(env.state.pool(), TransactionType::Usage)
        .await
        .expect("ledger");
    let flour_usage: Vec<_> = usage
        .iter()
        .filter(|t| t.ingredient_id == s.flour_id)
        .collect();
    assert_eq!(flour_usage.len(), 2);
    assert!(flour_usage.iter().all(|t| approx_eq(t.quantity, 6.0)));
}

#[tokio::test]
async fn manual_adjustment_is_signed_and_floors_at_zero() {
    let env = test_env().await;
    let id = seed_ingredient(&env.state, "Salt", "kg", 4.0, 1.0).await;

    let updated = inventory::adjust(
        &env.state.db,
        id,
        &AdjustStockRequest {
            quantity_delta: -1.5,
            reason: Some("stocktake".to_string()),
        },
    )
    .await
    .expect("adjust down");
    assert!(approx_eq(updated.current_stock, 2.5));

    let updated = inventory::adjust(
        &env.state.db,
        id,
        &AdjustStockRequest {
            quantity_delta: -10.0,
            reason: None,
        },
    )
    .await
    .expect("adjust past zero");
    assert!(approx_eq(updated.current_stock, 0.0));

    let adjustments =
        ingredient::list_transactions_by_type(env.state.pool(), TransactionType::Adjustment)
            .await
            .expect("ledger");
    assert_eq!(adjustments.len(), 2);
}

#[tokio::test]
async fn low_stock_lists_ingredients_at_or_below_minimum() {
    let env = test_env().await;
    seed_ingredient(&env.state, "Plenty", "kg", 10.0, 2.0).await;
    let low = seed_ingredient(&env.state, "Scarce", "kg", 1.5, 2.0).await;

    let listing = ingredient::find_low_stock(env.state.pool())
        .await
        .expect("query");
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, low);
}
