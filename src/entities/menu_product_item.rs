//! Join table between menu products and the inventory items they use.
//!
//! The composite primary key makes duplicate associations impossible.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Association row: one menu product uses one inventory item
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_product_items")]
pub struct Model {
    /// Menu product side of the association
    #[sea_orm(primary_key, auto_increment = false)]
    pub menu_product_id: i32,
    /// Inventory item side of the association
    #[sea_orm(primary_key, auto_increment = false)]
    pub inventory_item_id: i32,
}

/// Both sides cascade: removing either record removes its association rows
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The product that uses the item
    #[sea_orm(
        belongs_to = "super::menu_product::Entity",
        from = "Column::MenuProductId",
        to = "super::menu_product::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    MenuProduct,
    /// The item used by the product
    #[sea_orm(
        belongs_to = "super::inventory_item::Entity",
        from = "Column::InventoryItemId",
        to = "super::inventory_item::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    InventoryItem,
}

impl Related<super::menu_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuProduct.def()
    }
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
