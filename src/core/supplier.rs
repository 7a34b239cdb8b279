//! Supplier business logic - CRUD over supplier records.
//!
//! Suppliers are created active with today's registration date. Updates overwrite
//! every field with the submitted values, absent values included. Deleting a supplier
//! clears the reference on every inventory item it supplied before removing the row,
//! so dependent items survive.

use crate::{
    entities::{InventoryItem, Supplier, inventory_item, supplier},
    errors::{Error, Result},
};
use sea_orm::{
    Condition, QueryOrder, Set, TransactionTrait, Value, prelude::*, sea_query::Expr,
};
use tracing::{debug, info, warn};

/// Field values submitted for a supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierInput {
    /// Supplier name, required and unique
    pub name: String,
    /// Contact phone number
    pub phone: Option<String>,
    /// Contact email address
    pub email: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Kind of goods supplied
    pub product_type: Option<String>,
    /// Tax identifier, unique when present
    pub tax_id: Option<String>,
}

/// Optional narrowing of the supplier listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierFilter {
    /// Only suppliers with this active flag
    pub active: Option<bool>,
    /// Only suppliers with exactly this product type
    pub product_type: Option<String>,
    /// Substring matched against name or tax id
    pub search: Option<String>,
}

fn validate(input: &SupplierInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(Error::invalid("name", "Supplier name cannot be empty"));
    }
    Ok(())
}

/// Retrieves every supplier in storage order.
pub async fn get_all_suppliers(db: &DatabaseConnection) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .order_by_asc(supplier::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves suppliers that may be assigned to inventory items.
///
/// Every inventory form calls this afresh so a supplier deactivated a moment ago is
/// no longer offered.
pub async fn get_active_suppliers(db: &DatabaseConnection) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .filter(supplier::Column::Active.eq(true))
        .order_by_asc(supplier::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves suppliers matching every set field of `filter`.
pub async fn find_suppliers(
    db: &DatabaseConnection,
    filter: &SupplierFilter,
) -> Result<Vec<supplier::Model>> {
    let mut query = Supplier::find();

    if let Some(active) = filter.active {
        query = query.filter(supplier::Column::Active.eq(active));
    }
    if let Some(product_type) = &filter.product_type {
        query = query.filter(supplier::Column::ProductType.eq(product_type.as_str()));
    }
    if let Some(search) = &filter.search {
        query = query.filter(
            Condition::any()
                .add(supplier::Column::Name.contains(search.as_str()))
                .add(supplier::Column::TaxId.contains(search.as_str())),
        );
    }

    query
        .order_by_asc(supplier::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a supplier by ID, returning None if it does not exist.
pub async fn get_supplier_by_id(
    db: &DatabaseConnection,
    supplier_id: i32,
) -> Result<Option<supplier::Model>> {
    debug!(supplier_id, "Looking up supplier");
    Supplier::find_by_id(supplier_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a supplier by ID.
///
/// # Errors
/// Returns [`Error::NotFound`] if no supplier has this ID.
pub async fn require_supplier(
    db: &DatabaseConnection,
    supplier_id: i32,
) -> Result<supplier::Model> {
    get_supplier_by_id(db, supplier_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "Supplier",
            id: supplier_id,
        })
}

/// Retrieves the inventory items supplied by a supplier.
pub async fn get_items_for_supplier(
    db: &DatabaseConnection,
    supplier_id: i32,
) -> Result<Vec<inventory_item::Model>> {
    InventoryItem::find()
        .filter(inventory_item::Column::SupplierId.eq(supplier_id))
        .order_by_asc(inventory_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new, active supplier registered today.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The name or tax id is already taken ([`Error::Conflict`])
/// - The database insert fails
pub async fn create_supplier(
    db: &DatabaseConnection,
    input: SupplierInput,
) -> Result<supplier::Model> {
    validate(&input)?;

    let supplier = supplier::ActiveModel {
        name: Set(input.name.trim().to_string()),
        phone: Set(input.phone),
        email: Set(input.email),
        address: Set(input.address),
        product_type: Set(input.product_type),
        tax_id: Set(input.tax_id),
        registered_on: Set(chrono::Local::now().date_naive()),
        active: Set(true),
        ..Default::default()
    };
    let supplier = supplier.insert(db).await?;
    info!(supplier_id = supplier.id, name = %supplier.name, "Supplier created");
    Ok(supplier)
}

/// Overwrites every field of an existing supplier.
///
/// Returns `Ok(None)` without touching storage when no supplier has this ID, even
/// when the submitted fields would not validate.
/// `registered_on` is never changed.
///
/// # Errors
/// Returns an error if the name is empty, a uniqueness constraint is violated,
/// or the database update fails.
pub async fn update_supplier(
    db: &DatabaseConnection,
    supplier_id: i32,
    input: SupplierInput,
    active: bool,
) -> Result<Option<supplier::Model>> {
    let Some(existing) = get_supplier_by_id(db, supplier_id).await? else {
        warn!(supplier_id, "Ignoring update for missing supplier");
        return Ok(None);
    };
    validate(&input)?;

    let mut supplier: supplier::ActiveModel = existing.into();
    supplier.name = Set(input.name.trim().to_string());
    supplier.phone = Set(input.phone);
    supplier.email = Set(input.email);
    supplier.address = Set(input.address);
    supplier.product_type = Set(input.product_type);
    supplier.tax_id = Set(input.tax_id);
    supplier.active = Set(active);

    let supplier = supplier.update(db).await?;
    info!(supplier_id, "Supplier updated");
    Ok(Some(supplier))
}

/// Hard-deletes a supplier, first clearing the reference on its inventory items.
///
/// Both steps run in one transaction.
///
/// # Errors
/// Returns [`Error::NotFound`] if no supplier has this ID, or an error if the
/// database operations fail.
pub async fn delete_supplier(db: &DatabaseConnection, supplier_id: i32) -> Result<supplier::Model> {
    let txn = db.begin().await?;

    let supplier = Supplier::find_by_id(supplier_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "Supplier",
            id: supplier_id,
        })?;

    let cleared = InventoryItem::update_many()
        .col_expr(
            inventory_item::Column::SupplierId,
            Expr::value(Value::Int(None)),
        )
        .filter(inventory_item::Column::SupplierId.eq(supplier_id))
        .exec(&txn)
        .await?;

    Supplier::delete_by_id(supplier_id).exec(&txn).await?;
    txn.commit().await?;

    info!(
        supplier_id,
        detached_items = cleared.rows_affected,
        "Supplier deleted"
    );
    Ok(supplier)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_supplier_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_supplier(&db, supplier_input("   ")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { field: "name", .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_created_supplier_appears_in_listing() -> Result<()> {
        let db = setup_test_db().await?;

        let supplier = create_test_supplier(&db, "Molino La Rosa").await?;
        assert!(supplier.active);
        assert_eq!(supplier.registered_on, chrono::Local::now().date_naive());

        let all = get_all_suppliers(&db).await?;
        assert!(all.iter().any(|s| s.name == "Molino La Rosa"));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_supplier(&db, "Lácteos Norte").await?;

        let result = create_supplier(&db, supplier_input("Lácteos Norte")).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_absent_tax_ids_do_not_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_supplier(&db, "First").await?;
        create_test_supplier(&db, "Second").await?;

        let mut input = supplier_input("Third");
        input.tax_id = Some("RFC-1".to_string());
        create_supplier(&db, input.clone()).await?;

        input.name = "Fourth".to_string();
        let result = create_supplier(&db, input).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_supplier_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(get_supplier_by_id(&db, 999).await?.is_none());
        let result = require_supplier(&db, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "Supplier",
                id: 999
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_overwrites_every_field() -> Result<()> {
        let db = setup_test_db().await?;
        let mut input = supplier_input("Verduras Paco");
        input.phone = Some("555-0101".to_string());
        input.email = Some("paco@example.com".to_string());
        let supplier = create_supplier(&db, input).await?;

        let updated = update_supplier(&db, supplier.id, supplier_input("Verduras Paco SA"), false)
            .await?
            .unwrap();

        assert_eq!(updated.name, "Verduras Paco SA");
        assert_eq!(updated.phone, None);
        assert_eq!(updated.email, None);
        assert!(!updated.active);
        assert_eq!(updated.registered_on, supplier.registered_on);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_supplier_is_ignored() -> Result<()> {
        let db = setup_test_db().await?;
        let existing = create_test_supplier(&db, "Only One").await?;

        let result = update_supplier(&db, 999, supplier_input("Ghost"), true).await?;
        assert!(result.is_none());

        let all = get_all_suppliers(&db).await?;
        assert_eq!(all, vec![existing]);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_supplier_detaches_items() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Quesos Ruiz").await?;
        let item = create_test_item(&db, "Mozzarella", Some(supplier.id)).await?;
        assert_eq!(item.supplier_id, Some(supplier.id));

        let deleted = delete_supplier(&db, supplier.id).await?;
        assert_eq!(deleted.id, supplier.id);

        assert!(get_supplier_by_id(&db, supplier.id).await?.is_none());
        let survivor = InventoryItem::find_by_id(item.id).one(&db).await?.unwrap();
        assert_eq!(survivor.supplier_id, None);
        assert_eq!(survivor.name, "Mozzarella");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_supplier_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_supplier(&db, 999).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_active_suppliers_and_filters() -> Result<()> {
        let db = setup_test_db().await?;
        let mut dairy = supplier_input("Lácteos Norte");
        dairy.product_type = Some("Dairy".to_string());
        dairy.tax_id = Some("LNO-778".to_string());
        let dairy = create_supplier(&db, dairy).await?;

        let flour = create_test_supplier(&db, "Molino La Rosa").await?;
        update_supplier(&db, flour.id, supplier_input("Molino La Rosa"), false).await?;

        let active = get_active_suppliers(&db).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, dairy.id);

        let inactive = find_suppliers(
            &db,
            &SupplierFilter {
                active: Some(false),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].id, flour.id);

        let by_type = find_suppliers(
            &db,
            &SupplierFilter {
                product_type: Some("Dairy".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_type.len(), 1);

        let by_tax_id = find_suppliers(
            &db,
            &SupplierFilter {
                search: Some("778".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_tax_id.len(), 1);
        assert_eq!(by_tax_id[0].id, dairy.id);

        let by_name = find_suppliers(
            &db,
            &SupplierFilter {
                search: Some("Molino".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, flour.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_items_for_supplier() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Quesos Ruiz").await?;
        create_test_item(&db, "Mozzarella", Some(supplier.id)).await?;
        create_test_item(&db, "Parmesano", Some(supplier.id)).await?;
        create_test_item(&db, "Harina", None).await?;

        let items = get_items_for_supplier(&db, supplier.id).await?;
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Mozzarella", "Parmesano"]);

        Ok(())
    }
}
