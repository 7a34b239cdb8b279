//! Supplier entity - Represents an external vendor providing goods.
//!
//! Suppliers are referenced by inventory items. Deleting a supplier never removes
//! the items it supplied; their `supplier_id` is cleared instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    /// Unique identifier for the supplier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Supplier name, unique across all suppliers
    #[sea_orm(unique)]
    pub name: String,
    /// Contact phone number
    pub phone: Option<String>,
    /// Contact email address
    pub email: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Kind of goods supplied (e.g. "Dairy", "Flour")
    pub product_type: Option<String>,
    /// Tax identifier, unique when present
    #[sea_orm(unique)]
    pub tax_id: Option<String>,
    /// Date the supplier was registered, assigned at creation
    pub registered_on: Date,
    /// Whether new inventory items may be assigned to this supplier
    pub active: bool,
}

/// Defines relationships between Supplier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One supplier supplies many inventory items
    #[sea_orm(has_many = "super::inventory_item::Entity")]
    InventoryItems,
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
