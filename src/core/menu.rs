//! Menu business logic - CRUD over menu products and their inventory associations.
//!
//! Creation is two-phase: the bare product is inserted first, then its association
//! set is assigned, but only when the submitted list is non-empty. Updates always
//! replace the association set, so an empty submission clears it. Both paths end in
//! the same state for an empty list.

use crate::{
    entities::{
        InventoryItem, MenuProduct, MenuProductItem, inventory_item, menu_product,
        menu_product_item,
    },
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{
    Condition, ConnectionTrait, DatabaseTransaction, QueryOrder, Set, TransactionTrait,
    prelude::*,
};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Scalar field values submitted for a menu product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuInput {
    /// Product name
    pub name: String,
    /// Free-text description
    pub description: Option<String>,
    /// Selling price, must not be negative
    pub price: Decimal,
    /// Menu category
    pub category: String,
    /// Serving size label
    pub size: Option<String>,
    /// Whether the product can be ordered
    pub available: bool,
}

/// Optional narrowing of the menu listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    /// Only products in this category
    pub category: Option<String>,
    /// Only products with this availability
    pub available: Option<bool>,
    /// Only products with this size label
    pub size: Option<String>,
    /// Substring matched against the product name
    pub search: Option<String>,
}

fn validate(input: &MenuInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(Error::invalid("name", "Product name cannot be empty"));
    }
    if input.category.trim().is_empty() {
        return Err(Error::invalid("category", "Category cannot be empty"));
    }
    if input.price < Decimal::ZERO {
        return Err(Error::invalid("price", "Price cannot be negative"));
    }
    Ok(())
}

/// Retrieves every menu product in storage order.
pub async fn get_all_menu_products(db: &DatabaseConnection) -> Result<Vec<menu_product::Model>> {
    MenuProduct::find()
        .order_by_asc(menu_product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves products matching every set field of `filter`.
pub async fn find_menu_products(
    db: &DatabaseConnection,
    filter: &MenuFilter,
) -> Result<Vec<menu_product::Model>> {
    let mut condition = Condition::all();

    if let Some(category) = &filter.category {
        condition = condition.add(menu_product::Column::Category.eq(category.as_str()));
    }
    if let Some(available) = filter.available {
        condition = condition.add(menu_product::Column::Available.eq(available));
    }
    if let Some(size) = &filter.size {
        condition = condition.add(menu_product::Column::Size.eq(size.as_str()));
    }
    if let Some(search) = &filter.search {
        condition = condition.add(menu_product::Column::Name.contains(search.as_str()));
    }

    MenuProduct::find()
        .filter(condition)
        .order_by_asc(menu_product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by ID, returning None if it does not exist.
pub async fn get_menu_product_by_id(
    db: &DatabaseConnection,
    product_id: i32,
) -> Result<Option<menu_product::Model>> {
    debug!(product_id, "Looking up menu product");
    MenuProduct::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by ID.
///
/// # Errors
/// Returns [`Error::NotFound`] if no product has this ID.
pub async fn require_menu_product(
    db: &DatabaseConnection,
    product_id: i32,
) -> Result<menu_product::Model> {
    get_menu_product_by_id(db, product_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "Menu product",
            id: product_id,
        })
}

/// Retrieves the inventory items a product is associated with.
pub async fn get_items_for_product(
    db: &DatabaseConnection,
    product: &menu_product::Model,
) -> Result<Vec<inventory_item::Model>> {
    product
        .find_related(InventoryItem)
        .order_by_asc(inventory_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Replaces a product's association set with `item_ids`, atomically.
///
/// Duplicates collapse and identifiers that match no inventory item are dropped.
/// Returns the identifiers actually stored, ascending.
///
/// # Errors
/// Returns [`Error::NotFound`] if no product has this ID, or an error if the
/// database operations fail.
pub async fn replace_associations(
    db: &DatabaseConnection,
    product_id: i32,
    item_ids: &[i32],
) -> Result<Vec<i32>> {
    let txn = db.begin().await?;

    if MenuProduct::find_by_id(product_id).one(&txn).await?.is_none() {
        return Err(Error::NotFound {
            entity: "Menu product",
            id: product_id,
        });
    }

    let replaced = write_associations(&txn, product_id, item_ids).await;
    finish(txn, replaced).await
}

/// Deletes every join row of `product_id` and inserts the deduplicated, existing
/// subset of `item_ids`. Runs on whatever connection or transaction it is given.
async fn write_associations<C: ConnectionTrait>(
    conn: &C,
    product_id: i32,
    item_ids: &[i32],
) -> Result<Vec<i32>> {
    let requested: BTreeSet<i32> = item_ids.iter().copied().collect();
    let existing: BTreeSet<i32> = if requested.is_empty() {
        BTreeSet::new()
    } else {
        InventoryItem::find()
            .filter(inventory_item::Column::Id.is_in(requested.iter().copied()))
            .all(conn)
            .await?
            .into_iter()
            .map(|item| item.id)
            .collect()
    };
    if existing.len() < requested.len() {
        warn!(
            product_id,
            dropped = requested.len() - existing.len(),
            "Ignoring unknown inventory items"
        );
    }

    MenuProductItem::delete_many()
        .filter(menu_product_item::Column::MenuProductId.eq(product_id))
        .exec(conn)
        .await?;

    if !existing.is_empty() {
        let rows = existing.iter().map(|&inventory_item_id| menu_product_item::ActiveModel {
            menu_product_id: Set(product_id),
            inventory_item_id: Set(inventory_item_id),
        });
        MenuProductItem::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    debug!(product_id, items = ?existing, "Associations replaced");
    Ok(existing.into_iter().collect())
}

/// Commits `txn` when `result` is a success, rolls it back otherwise.
async fn finish<T>(txn: DatabaseTransaction, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}

/// Creates a product, then assigns its association set if `item_ids` is non-empty.
///
/// Both steps share one transaction: a failed assignment leaves no product behind.
///
/// # Errors
/// Returns an error if validation fails or the database operations fail.
pub async fn create_menu_product(
    db: &DatabaseConnection,
    input: MenuInput,
    item_ids: &[i32],
) -> Result<menu_product::Model> {
    validate(&input)?;

    let txn = db.begin().await?;
    let created = insert_with_items(&txn, input, item_ids).await;
    let product = finish(txn, created).await?;

    info!(product_id = product.id, name = %product.name, "Menu product created");
    Ok(product)
}

async fn insert_with_items(
    txn: &DatabaseTransaction,
    input: MenuInput,
    item_ids: &[i32],
) -> Result<menu_product::Model> {
    let product = menu_product::ActiveModel {
        name: Set(input.name.trim().to_string()),
        description: Set(input.description),
        price: Set(input.price.round_dp(2)),
        category: Set(input.category),
        size: Set(input.size),
        available: Set(input.available),
        ..Default::default()
    };
    let product = product.insert(txn).await?;

    if !item_ids.is_empty() {
        write_associations(txn, product.id, item_ids).await?;
    }
    Ok(product)
}

/// Overwrites a product's scalar fields, then replaces its association set.
///
/// Returns `Ok(None)` without touching storage when no product has this ID, even if
/// the submitted fields would not validate. Both writes share one transaction.
///
/// # Errors
/// Returns an error if validation fails or the database operations fail.
pub async fn update_menu_product(
    db: &DatabaseConnection,
    product_id: i32,
    input: MenuInput,
    item_ids: &[i32],
) -> Result<Option<menu_product::Model>> {
    let Some(existing) = get_menu_product_by_id(db, product_id).await? else {
        warn!(product_id, "Ignoring update for missing menu product");
        return Ok(None);
    };
    validate(&input)?;

    let txn = db.begin().await?;
    let updated = update_with_items(&txn, existing, input, item_ids).await;
    let product = finish(txn, updated).await?;

    info!(product_id, "Menu product updated");
    Ok(Some(product))
}

async fn update_with_items(
    txn: &DatabaseTransaction,
    existing: menu_product::Model,
    input: MenuInput,
    item_ids: &[i32],
) -> Result<menu_product::Model> {
    let product_id = existing.id;
    let mut product: menu_product::ActiveModel = existing.into();
    product.name = Set(input.name.trim().to_string());
    product.description = Set(input.description);
    product.price = Set(input.price.round_dp(2));
    product.category = Set(input.category);
    product.size = Set(input.size);
    product.available = Set(input.available);
    let product = product.update(txn).await?;

    write_associations(txn, product_id, item_ids).await?;
    Ok(product)
}

/// Deletes a product together with its associations, in one transaction.
///
/// # Errors
/// Returns [`Error::NotFound`] if no product has this ID, or an error if the
/// database operations fail.
pub async fn delete_menu_product(
    db: &DatabaseConnection,
    product_id: i32,
) -> Result<menu_product::Model> {
    let txn = db.begin().await?;

    let product = MenuProduct::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "Menu product",
            id: product_id,
        })?;

    MenuProductItem::delete_many()
        .filter(menu_product_item::Column::MenuProductId.eq(product_id))
        .exec(&txn)
        .await?;
    MenuProduct::delete_by_id(product_id).exec(&txn).await?;
    txn.commit().await?;

    info!(product_id, "Menu product deleted");
    Ok(product)
}
