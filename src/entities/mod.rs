//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod inventory_item;
pub mod menu_product;
pub mod menu_product_item;
pub mod supplier;

// Re-export specific types to avoid conflicts
pub use inventory_item::{
    Column as InventoryItemColumn, Entity as InventoryItem, Model as InventoryItemModel,
};
pub use menu_product::{
    Column as MenuProductColumn, Entity as MenuProduct, Model as MenuProductModel,
};
pub use menu_product_item::{
    Column as MenuProductItemColumn, Entity as MenuProductItem, Model as MenuProductItemModel,
};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
