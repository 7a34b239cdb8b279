//! Menu product entity - A sellable item on the menu.
//!
//! A product is composed of zero or more inventory items through the
//! `menu_product_items` join table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Product name (e.g. "Margherita")
    pub name: String,
    /// Free-text description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Selling price
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    /// Menu category (e.g. "Drink", "Dessert", "Main")
    pub category: String,
    /// Serving size label (e.g. "Small", "Large")
    pub size: Option<String>,
    /// Whether the product can currently be ordered
    pub available: bool,
}

impl Model {
    /// Label used in listings and confirmations, e.g. `Margherita - $9.50`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - ${:.2}", self.name, self.price)
    }
}

/// Defines relationships between MenuProduct and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Join rows linking this product to inventory items
    #[sea_orm(has_many = "super::menu_product_item::Entity")]
    MenuProductItems,
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        super::menu_product_item::Relation::InventoryItem.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::menu_product_item::Relation::MenuProduct.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
