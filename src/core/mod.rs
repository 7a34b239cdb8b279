//! Core business logic - framework-agnostic supplier, inventory and menu operations.
//!
//! Every function takes a `&DatabaseConnection` and returns [`crate::errors::Result`].
//! Updates addressed at a missing record return `Ok(None)`; direct lookups that must
//! succeed return [`crate::errors::Error::NotFound`].

/// Inventory item operations and supplier resolution
pub mod inventory;
/// Menu product operations and association management
pub mod menu;
/// Supplier operations
pub mod supplier;
