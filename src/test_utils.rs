//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{
        inventory::{self, InventoryInput},
        menu::{self, MenuInput},
        supplier::{self, SupplierInput},
    },
    entities,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Supplier input with only a name.
#[must_use]
pub fn supplier_input(name: &str) -> SupplierInput {
    SupplierInput {
        name: name.to_string(),
        ..Default::default()
    }
}

/// Inventory input with sensible defaults.
///
/// # Defaults
/// * `stock`: 10
/// * `unit`: "kg"
/// * `min_stock`, `unit_cost`: 0
/// * no purchase date, no supplier
#[must_use]
pub fn item_input(name: &str) -> InventoryInput {
    InventoryInput {
        name: name.to_string(),
        stock: Decimal::new(10, 0),
        unit: "kg".to_string(),
        last_purchase_on: None,
        min_stock: Decimal::ZERO,
        unit_cost: Decimal::ZERO,
        supplier_id: None,
    }
}

/// Menu input with sensible defaults.
///
/// # Defaults
/// * `price`: 9.50
/// * `category`: "Main"
/// * no description, no size, available
#[must_use]
pub fn menu_input(name: &str) -> MenuInput {
    MenuInput {
        name: name.to_string(),
        description: None,
        price: Decimal::new(950, 2),
        category: "Main".to_string(),
        size: None,
        available: true,
    }
}

/// Creates a test supplier with only a name.
pub async fn create_test_supplier(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::supplier::Model> {
    supplier::create_supplier(db, supplier_input(name)).await
}

/// Creates a test inventory item, optionally linked to a supplier.
pub async fn create_test_item(
    db: &DatabaseConnection,
    name: &str,
    supplier_id: Option<i32>,
) -> Result<entities::inventory_item::Model> {
    let mut input = item_input(name);
    input.supplier_id = supplier_id;
    inventory::create_item(db, input).await
}

/// Creates a test menu product associated with `item_ids`.
pub async fn create_test_menu_product(
    db: &DatabaseConnection,
    name: &str,
    item_ids: &[i32],
) -> Result<entities::menu_product::Model> {
    menu::create_menu_product(db, menu_input(name), item_ids).await
}
