//! Inventory item entity - A stocked raw material or supply.
//!
//! Quantities and costs are two-place decimals. An item optionally belongs to one
//! supplier and may be used by any number of menu products.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Item name (e.g. "Mozzarella")
    pub name: String,
    /// Quantity currently in stock, never negative
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub stock: Decimal,
    /// Unit of measure (e.g. "kg", "litre", "piece")
    pub unit: String,
    /// Date of the most recent purchase, if any
    pub last_purchase_on: Option<Date>,
    /// Stock level below which the item should be reordered
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub min_stock: Decimal,
    /// Cost of one unit
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub unit_cost: Decimal,
    /// Supplier of this item, cleared when the supplier is deleted
    pub supplier_id: Option<i32>,
}

impl Model {
    /// Label used in selection lists, e.g. `Mozzarella (5.00 kg)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({:.2} {})", self.name, self.stock, self.unit)
    }
}

/// Defines relationships between InventoryItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item optionally belongs to one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Supplier,
    /// Join rows linking this item to menu products
    #[sea_orm(has_many = "super::menu_product_item::Entity")]
    MenuProductItems,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::menu_product::Entity> for Entity {
    fn to() -> RelationDef {
        super::menu_product_item::Relation::MenuProduct.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::menu_product_item::Relation::InventoryItem.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
