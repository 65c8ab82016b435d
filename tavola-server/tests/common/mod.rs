//! Shared fixtures for integration tests
//!
//! Each test gets a fresh SQLite database in a temp directory plus a
//! small seeded restaurant: one table, two menu items with recipes, two
//! ingredients and one customer.

#![allow(dead_code)]

use tempfile::TempDir;

use shared::models::{CustomerCreate, DiningTableCreate, IngredientCreate, MenuItem};
use shared::util::{now_millis, snowflake_id};
use tavola_server::db::repository::{customer, dining_table, ingredient, menu_item, recipe};
use tavola_server::{Config, ServerState};

pub struct TestEnv {
    pub state: ServerState,
    // Held so the database directory outlives the test
    _work_dir: TempDir,
}

pub async fn test_env() -> TestEnv {
    let work_dir = TempDir::new().expect("temp dir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("state init");
    TestEnv {
        state,
        _work_dir: work_dir,
    }
}

pub struct Seed {
    pub table_id: i64,
    pub customer_id: i64,
    pub flour_id: i64,
    pub cheese_id: i64,
    /// Pizza: 25.00, needs 0.3kg flour + 0.2kg cheese per serving
    pub pizza_id: i64,
    /// Salad: 10.00, no recipe
    pub salad_id: i64,
}

pub async fn seed(state: &ServerState) -> Seed {
    let pool = state.pool();
    let now = now_millis();

    let table_id = snowflake_id();
    dining_table::insert(
        pool,
        table_id,
        &DiningTableCreate {
            table_number: "T1".to_string(),
            capacity: Some(4),
        },
    )
    .await
    .expect("seed table");

    let customer_id = snowflake_id();
    customer::insert(
        pool,
        customer_id,
        &CustomerCreate {
            name: "Ada".to_string(),
            phone: None,
            email: None,
            loyalty_points: None,
        },
        now,
    )
    .await
    .expect("seed customer");

    let flour_id = seed_ingredient(state, "Flour", "kg", 10.0, 2.0).await;
    let cheese_id = seed_ingredient(state, "Cheese", "kg", 5.0, 1.0).await;

    let pizza_id = seed_menu_item(state, "Pizza", 25.0).await;
    let salad_id = seed_menu_item(state, "Salad", 10.0).await;
    recipe::set_line(pool, pizza_id, flour_id, 0.3)
        .await
        .expect("seed recipe");
    recipe::set_line(pool, pizza_id, cheese_id, 0.2)
        .await
        .expect("seed recipe");

    Seed {
        table_id,
        customer_id,
        flour_id,
        cheese_id,
        pizza_id,
        salad_id,
    }
}

pub async fn seed_ingredient(
    state: &ServerState,
    name: &str,
    unit: &str,
    stock: f64,
    min_stock: f64,
) -> i64 {
    let id = snowflake_id();
    ingredient::insert(
        state.pool(),
        id,
        &IngredientCreate {
            name: name.to_string(),
            unit: unit.to_string(),
            current_stock: Some(stock),
            min_stock: Some(min_stock),
            cost_per_unit: None,
        },
        now_millis(),
    )
    .await
    .expect("seed ingredient");
    id
}

pub async fn seed_menu_item(state: &ServerState, name: &str, price: f64) -> i64 {
    let id = snowflake_id();
    menu_item::insert(
        state.pool(),
        &MenuItem {
            id,
            name: name.to_string(),
            description: None,
            category: None,
            price,
            preparation_time: None,
            is_available: true,
            created_at: now_millis(),
        },
    )
    .await
    .expect("seed menu item");
    id
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
