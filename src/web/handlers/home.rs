//! Landing page with record counts, and the liveness check.

use crate::{
    entities::{InventoryItem, MenuProduct, Supplier},
    errors::Result,
    web::AppState,
};
use axum::{extract::State, response::Html};
use sea_orm::{EntityTrait, PaginatorTrait};
use tera::Context;

/// `GET /` landing page with record counts.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let db = state.database.as_ref();

    let mut context = Context::new();
    context.insert("suppliers", &Supplier::find().count(db).await?);
    context.insert("inventory_items", &InventoryItem::find().count(db).await?);
    context.insert("menu_products", &MenuProduct::find().count(db).await?);

    state.views.render("home.html", context)
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}
