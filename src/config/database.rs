//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema (including the foreign keys on
//! `inventory_items` and `menu_product_items`) always matches the Rust models.

use crate::entities::{InventoryItem, MenuProduct, MenuProductItem, Supplier};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::info;

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    info!(url = %database_url, "Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables that do not exist yet.
///
/// Tables are created in dependency order: suppliers, then inventory items, then
/// menu products, then the join table referencing both.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, Supplier).await?;
    create_table(db, InventoryItem).await?;
    create_table(db, MenuProduct).await?;
    create_table(db, MenuProductItem).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(builder.build(&statement)).await?;
    Ok(())
}
