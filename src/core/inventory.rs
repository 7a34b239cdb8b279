//! Inventory business logic - CRUD over stocked items.
//!
//! An item's supplier is resolved from the submitted identifier on every create and
//! update. An absent identifier, or one that matches no supplier, leaves the item
//! without a supplier; the failed lookup is logged and otherwise ignored.

use crate::{
    core::supplier as supplier_service,
    entities::{
        InventoryItem, MenuProduct, MenuProductItem, Supplier, inventory_item, menu_product,
        menu_product_item, supplier,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, warn};

/// Field values submitted for an inventory item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryInput {
    /// Item name
    pub name: String,
    /// Quantity in stock, must not be negative
    pub stock: Decimal,
    /// Unit of measure
    pub unit: String,
    /// Date of the most recent purchase
    pub last_purchase_on: Option<NaiveDate>,
    /// Reorder threshold
    pub min_stock: Decimal,
    /// Cost of one unit
    pub unit_cost: Decimal,
    /// Submitted supplier identifier, resolved before storing
    pub supplier_id: Option<i32>,
}

/// Optional narrowing of the inventory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    /// Only items measured in this unit
    pub unit: Option<String>,
    /// Only items from this supplier
    pub supplier_id: Option<i32>,
    /// Substring matched against the item name
    pub search: Option<String>,
}

fn validate(input: &InventoryInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(Error::invalid("name", "Item name cannot be empty"));
    }
    if input.stock < Decimal::ZERO {
        return Err(Error::invalid("stock", "Stock cannot be negative"));
    }
    Ok(())
}

/// Retrieves every inventory item in storage order.
pub async fn get_all_items(db: &DatabaseConnection) -> Result<Vec<inventory_item::Model>> {
    InventoryItem::find()
        .order_by_asc(inventory_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves items matching every set field of `filter`, each paired with its supplier.
pub async fn find_items(
    db: &DatabaseConnection,
    filter: &InventoryFilter,
) -> Result<Vec<(inventory_item::Model, Option<supplier::Model>)>> {
    let mut query = InventoryItem::find();

    if let Some(unit) = &filter.unit {
        query = query.filter(inventory_item::Column::Unit.eq(unit.as_str()));
    }
    if let Some(supplier_id) = filter.supplier_id {
        query = query.filter(inventory_item::Column::SupplierId.eq(supplier_id));
    }
    if let Some(search) = &filter.search {
        query = query.filter(inventory_item::Column::Name.contains(search.as_str()));
    }

    query
        .find_also_related(Supplier)
        .order_by_asc(inventory_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an item by ID, returning None if it does not exist.
pub async fn get_item_by_id(
    db: &DatabaseConnection,
    item_id: i32,
) -> Result<Option<inventory_item::Model>> {
    debug!(item_id, "Looking up inventory item");
    InventoryItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an item by ID.
///
/// # Errors
/// Returns [`Error::NotFound`] if no item has this ID.
pub async fn require_item(db: &DatabaseConnection, item_id: i32) -> Result<inventory_item::Model> {
    get_item_by_id(db, item_id).await?.ok_or(Error::NotFound {
        entity: "Inventory item",
        id: item_id,
    })
}

/// Retrieves the menu products that use an item.
pub async fn get_menu_products_for_item(
    db: &DatabaseConnection,
    item: &inventory_item::Model,
) -> Result<Vec<menu_product::Model>> {
    item.find_related(MenuProduct)
        .order_by_asc(menu_product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Suppliers offered on an item form: the active ones, plus the item's current
/// supplier when it has since been deactivated.
pub async fn supplier_options(
    db: &DatabaseConnection,
    current: Option<i32>,
) -> Result<Vec<supplier::Model>> {
    let mut options = supplier_service::get_active_suppliers(db).await?;

    if let Some(current_id) = current {
        if !options.iter().any(|s| s.id == current_id) {
            if let Some(current) = supplier_service::get_supplier_by_id(db, current_id).await? {
                options.push(current);
            }
        }
    }

    Ok(options)
}

/// Turns a submitted supplier identifier into a stored reference.
///
/// Identifiers that match no supplier resolve to `None`.
pub async fn resolve_supplier(
    db: &DatabaseConnection,
    supplier_id: Option<i32>,
) -> Result<Option<i32>> {
    let Some(supplier_id) = supplier_id else {
        return Ok(None);
    };

    match Supplier::find_by_id(supplier_id).one(db).await? {
        Some(supplier) => Ok(Some(supplier.id)),
        None => {
            warn!(supplier_id, "Submitted supplier does not exist, clearing reference");
            Ok(None)
        }
    }
}

/// Creates a new inventory item.
///
/// # Errors
/// Returns an error if the name is empty, the stock is negative, or the database
/// insert fails.
pub async fn create_item(
    db: &DatabaseConnection,
    input: InventoryInput,
) -> Result<inventory_item::Model> {
    validate(&input)?;
    let supplier_id = resolve_supplier(db, input.supplier_id).await?;

    let item = inventory_item::ActiveModel {
        name: Set(input.name.trim().to_string()),
        stock: Set(input.stock.round_dp(2)),
        unit: Set(input.unit),
        last_purchase_on: Set(input.last_purchase_on),
        min_stock: Set(input.min_stock.round_dp(2)),
        unit_cost: Set(input.unit_cost.round_dp(2)),
        supplier_id: Set(supplier_id),
        ..Default::default()
    };
    let item = item.insert(db).await?;
    info!(item_id = item.id, name = %item.name, "Inventory item created");
    Ok(item)
}

/// Overwrites every field of an existing item, re-resolving its supplier.
///
/// Returns `Ok(None)` without touching storage when no item has this ID, even when
/// the submitted fields would not validate.
///
/// # Errors
/// Returns an error if the name is empty, the stock is negative, or the database
/// update fails.
pub async fn update_item(
    db: &DatabaseConnection,
    item_id: i32,
    input: InventoryInput,
) -> Result<Option<inventory_item::Model>> {
    let Some(existing) = get_item_by_id(db, item_id).await? else {
        warn!(item_id, "Ignoring update for missing inventory item");
        return Ok(None);
    };
    validate(&input)?;
    let supplier_id = resolve_supplier(db, input.supplier_id).await?;

    let mut item: inventory_item::ActiveModel = existing.into();
    item.name = Set(input.name.trim().to_string());
    item.stock = Set(input.stock.round_dp(2));
    item.unit = Set(input.unit);
    item.last_purchase_on = Set(input.last_purchase_on);
    item.min_stock = Set(input.min_stock.round_dp(2));
    item.unit_cost = Set(input.unit_cost.round_dp(2));
    item.supplier_id = Set(supplier_id);

    let item = item.update(db).await?;
    info!(item_id, "Inventory item updated");
    Ok(Some(item))
}

/// Deletes an item together with its menu associations, in one transaction.
///
/// # Errors
/// Returns [`Error::NotFound`] if no item has this ID, or an error if the database
/// operations fail.
pub async fn delete_item(db: &DatabaseConnection, item_id: i32) -> Result<inventory_item::Model> {
    let txn = db.begin().await?;

    let item = InventoryItem::find_by_id(item_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "Inventory item",
            id: item_id,
        })?;

    MenuProductItem::delete_many()
        .filter(menu_product_item::Column::InventoryItemId.eq(item_id))
        .exec(&txn)
        .await?;
    InventoryItem::delete_by_id(item_id).exec(&txn).await?;
    txn.commit().await?;

    info!(item_id, "Inventory item deleted");
    Ok(item)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_item_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_item(&db, item_input("")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { field: "name", .. }
        ));

        let mut negative = item_input("Harina");
        negative.stock = Decimal::new(-150, 2);
        let result = create_item(&db, negative).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { field: "stock", .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_item_with_supplier() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Molino La Rosa").await?;

        let mut input = item_input("Harina 00");
        input.stock = Decimal::new(2550, 2);
        input.unit_cost = Decimal::new(125, 2);
        input.supplier_id = Some(supplier.id);
        let item = create_item(&db, input).await?;

        assert_eq!(item.supplier_id, Some(supplier.id));
        let stored = get_item_by_id(&db, item.id).await?.unwrap();
        assert_eq!(stored.stock, Decimal::new(2550, 2));
        assert_eq!(stored.unit_cost, Decimal::new(125, 2));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_supplier_reference_is_cleared() -> Result<()> {
        let db = setup_test_db().await?;

        let mut input = item_input("Aceite de oliva");
        input.supplier_id = Some(4242);
        let item = create_item(&db, input).await?;

        assert_eq!(item.supplier_id, None);
        assert_eq!(get_all_items(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_empty_date_stores_absent() -> Result<()> {
        let db = setup_test_db().await?;
        let mut input = item_input("Tomate");
        input.last_purchase_on = NaiveDate::from_ymd_opt(2024, 3, 1);
        let item = create_item(&db, input).await?;
        assert!(item.last_purchase_on.is_some());

        let updated = update_item(&db, item.id, item_input("Tomate")).await?.unwrap();
        assert_eq!(updated.last_purchase_on, None);

        let stored = get_item_by_id(&db, item.id).await?.unwrap();
        assert_eq!(stored.last_purchase_on, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_reresolves_supplier() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Quesos Ruiz").await?;
        let item = create_test_item(&db, "Mozzarella", Some(supplier.id)).await?;

        // No supplier submitted clears the reference
        let updated = update_item(&db, item.id, item_input("Mozzarella")).await?.unwrap();
        assert_eq!(updated.supplier_id, None);

        let mut input = item_input("Mozzarella");
        input.supplier_id = Some(supplier.id);
        let updated = update_item(&db, item.id, input).await?.unwrap();
        assert_eq!(updated.supplier_id, Some(supplier.id));

        let mut input = item_input("Mozzarella");
        input.supplier_id = Some(999);
        let updated = update_item(&db, item.id, input).await?.unwrap();
        assert_eq!(updated.supplier_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_item_is_ignored() -> Result<()> {
        let db = setup_test_db().await?;
        let item = create_test_item(&db, "Albahaca", None).await?;

        let result = update_item(&db, 999, item_input("Ghost")).await?;
        assert!(result.is_none());
        assert_eq!(get_all_items(&db).await?, vec![item]);

        Ok(())
    }

    #[tokio::test]
    async fn test_supplier_options_keep_inactive_current_supplier() -> Result<()> {
        let db = setup_test_db().await?;
        let active = create_test_supplier(&db, "Activo").await?;
        let retired = create_test_supplier(&db, "Retirado").await?;
        crate::core::supplier::update_supplier(&db, retired.id, supplier_input("Retirado"), false)
            .await?;

        let fresh = supplier_options(&db, None).await?;
        assert_eq!(fresh.iter().map(|s| s.id).collect::<Vec<_>>(), vec![active.id]);

        let editing = supplier_options(&db, Some(retired.id)).await?;
        assert_eq!(
            editing.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![active.id, retired.id]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_find_items_filters() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Quesos Ruiz").await?;
        create_test_item(&db, "Mozzarella", Some(supplier.id)).await?;
        let mut litres = item_input("Leche");
        litres.unit = "litre".to_string();
        create_item(&db, litres).await?;

        let all = find_items(&db, &InventoryFilter::default()).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].1.as_ref().map(|s| s.id), Some(supplier.id));
        assert!(all[1].1.is_none());

        let by_unit = find_items(
            &db,
            &InventoryFilter {
                unit: Some("litre".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_unit.len(), 1);
        assert_eq!(by_unit[0].0.name, "Leche");

        let by_supplier = find_items(
            &db,
            &InventoryFilter {
                supplier_id: Some(supplier.id),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_supplier.len(), 1);
        assert_eq!(by_supplier[0].0.name, "Mozzarella");

        let by_name = find_items(
            &db,
            &InventoryFilter {
                search: Some("zza".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_name.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item_removes_menu_associations() -> Result<()> {
        let db = setup_test_db().await?;
        let cheese = create_test_item(&db, "Mozzarella", None).await?;
        let dough = create_test_item(&db, "Masa", None).await?;
        let pizza = create_test_menu_product(&db, "Margherita", &[cheese.id, dough.id]).await?;

        assert_eq!(get_menu_products_for_item(&db, &cheese).await?, vec![pizza.clone()]);

        delete_item(&db, cheese.id).await?;
        assert!(get_item_by_id(&db, cheese.id).await?.is_none());

        let remaining = crate::core::menu::get_items_for_product(&db, &pizza).await?;
        assert_eq!(remaining.iter().map(|i| i.id).collect::<Vec<_>>(), vec![dough.id]);

        let result = delete_item(&db, cheese.id).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[test]
    fn test_item_label() {
        let item = inventory_item::Model {
            id: 1,
            name: "Mozzarella".to_string(),
            stock: Decimal::new(5, 0),
            unit: "kg".to_string(),
            last_purchase_on: None,
            min_stock: Decimal::ZERO,
            unit_cost: Decimal::ZERO,
            supplier_id: None,
        };
        assert_eq!(item.label(), "Mozzarella (5.00 kg)");
    }
}
