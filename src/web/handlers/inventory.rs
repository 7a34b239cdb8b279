//! Inventory routes: list, add, detail, edit, delete.
//!
//! Every form view re-queries the active suppliers for its selection list.

use super::non_blank;
use crate::{
    core::{
        inventory::{self, InventoryFilter},
        supplier,
    },
    entities::{inventory_item, supplier as supplier_entity},
    errors::Result,
    web::{AppState, forms},
};
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tera::Context;
use tracing::warn;

const LIST: &str = "/inventory/";

/// Inventory routes, mounted at the application root.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST, get(list))
        .route("/inventory/add/", get(add_form).post(add))
        .route("/inventory/:id/", get(detail))
        .route("/inventory/edit/:id/", get(edit_form))
        .route("/inventory/edit/submit/", get(to_list).post(edit_submit))
        .route("/inventory/delete/:id/", get(confirm_delete).post(delete))
}

/// Listing filters from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    unit: Option<String>,
    supplier: Option<String>,
    q: Option<String>,
}

impl From<ListQuery> for InventoryFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            unit: non_blank(query.unit),
            supplier_id: non_blank(query.supplier).and_then(|s| s.parse().ok()),
            search: non_blank(query.q),
        }
    }
}

#[derive(Debug, Serialize)]
struct Row {
    item: inventory_item::Model,
    supplier: Option<supplier_entity::Model>,
    below_minimum: bool,
}

async fn to_list() -> Redirect {
    Redirect::to(LIST)
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>> {
    let db = state.database.as_ref();
    let filter = InventoryFilter::from(query);
    let rows: Vec<Row> = inventory::find_items(db, &filter)
        .await?
        .into_iter()
        .map(|(item, supplier)| Row {
            below_minimum: item.stock < item.min_stock,
            item,
            supplier,
        })
        .collect();

    let mut context = Context::new();
    context.insert("rows", &rows);
    context.insert("suppliers", &supplier::get_all_suppliers(db).await?);
    context.insert("filter_unit", &filter.unit);
    context.insert("filter_supplier", &filter.supplier_id);
    context.insert("filter_q", &filter.search);
    state.views.render("inventory/list.html", context)
}

async fn add_form(State(state): State<AppState>) -> Result<Html<String>> {
    let mut context = Context::new();
    context.insert("suppliers", &inventory::supplier_options(&state.database, None).await?);
    state.views.render("inventory/form.html", context)
}

async fn add(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let input = forms::inventory_input(&pairs.into())?;
    inventory::create_item(&state.database, input).await?;
    Ok(Redirect::to(LIST))
}

async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let db = state.database.as_ref();
    let item = inventory::require_item(db, id).await?;
    let supplier = match item.supplier_id {
        Some(supplier_id) => supplier::get_supplier_by_id(db, supplier_id).await?,
        None => None,
    };
    let products = inventory::get_menu_products_for_item(db, &item).await?;

    let mut context = Context::new();
    context.insert("label", &item.label());
    context.insert("item", &item);
    context.insert("supplier", &supplier);
    context.insert("products", &products);
    state.views.render("inventory/detail.html", context)
}

async fn edit_form(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let db = state.database.as_ref();
    let item = inventory::require_item(db, id).await?;

    let mut context = Context::new();
    context.insert("suppliers", &inventory::supplier_options(db, item.supplier_id).await?);
    context.insert("item", &item);
    state.views.render("inventory/form.html", context)
}

async fn edit_submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let form = forms::FormFields::from(pairs);
    let Some(id) = form.id("id") else {
        warn!("Inventory edit submitted without a usable id");
        return Ok(Redirect::to(LIST));
    };
    if inventory::get_item_by_id(&state.database, id).await?.is_none() {
        warn!(item_id = id, "Inventory edit submitted for a missing record");
        return Ok(Redirect::to(LIST));
    }

    let input = forms::inventory_input(&form)?;
    inventory::update_item(&state.database, id, input).await?;
    Ok(Redirect::to(LIST))
}

async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>> {
    let item = inventory::require_item(&state.database, id).await?;

    let mut context = Context::new();
    context.insert("label", &item.label());
    context.insert("item", &item);
    state.views.render("inventory/delete.html", context)
}

async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Redirect> {
    inventory::delete_item(&state.database, id).await?;
    Ok(Redirect::to(LIST))
}
