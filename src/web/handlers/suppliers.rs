//! Supplier routes: list, add, detail, edit, delete.

use super::{flag, non_blank};
use crate::{
    core::supplier::{self, SupplierFilter},
    errors::Result,
    web::{AppState, forms},
};
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::get,
};
use serde::Deserialize;
use tera::Context;
use tracing::warn;

const LIST: &str = "/suppliers/";

/// Supplier routes, mounted at the application root.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST, get(list))
        .route("/suppliers/add/", get(add_form).post(add))
        .route("/suppliers/:id/", get(detail))
        .route("/suppliers/edit/:id/", get(edit_form))
        .route("/suppliers/edit/submit/", get(to_list).post(edit_submit))
        .route("/suppliers/delete/:id/", get(confirm_delete).post(delete))
}

/// Listing filters from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    active: Option<String>,
    product_type: Option<String>,
    q: Option<String>,
}

impl From<ListQuery> for SupplierFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            active: flag(query.active.as_deref()),
            product_type: non_blank(query.product_type),
            search: non_blank(query.q),
        }
    }
}

async fn to_list() -> Redirect {
    Redirect::to(LIST)
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>> {
    let filter = SupplierFilter::from(query);
    let suppliers = supplier::find_suppliers(&state.database, &filter).await?;

    let mut context = Context::new();
    context.insert("suppliers", &suppliers);
    context.insert("filter_active", &filter.active);
    context.insert("filter_product_type", &filter.product_type);
    context.insert("filter_q", &filter.search);
    state.views.render("suppliers/list.html", context)
}

async fn add_form(State(state): State<AppState>) -> Result<Html<String>> {
    state.views.render("suppliers/form.html", Context::new())
}

async fn add(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let input = forms::supplier_input(&pairs.into())?;
    supplier::create_supplier(&state.database, input).await?;
    Ok(Redirect::to(LIST))
}

async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let supplier = supplier::require_supplier(&state.database, id).await?;
    let items = supplier::get_items_for_supplier(&state.database, id).await?;

    let mut context = Context::new();
    context.insert("supplier", &supplier);
    context.insert("items", &items);
    state.views.render("suppliers/detail.html", context)
}

async fn edit_form(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let supplier = supplier::require_supplier(&state.database, id).await?;

    let mut context = Context::new();
    context.insert("supplier", &supplier);
    state.views.render("suppliers/form.html", context)
}

async fn edit_submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let form = forms::FormFields::from(pairs);
    let Some(id) = form.id("id") else {
        warn!("Supplier edit submitted without a usable id");
        return Ok(Redirect::to(LIST));
    };
    if supplier::get_supplier_by_id(&state.database, id).await?.is_none() {
        warn!(supplier_id = id, "Supplier edit submitted for a missing record");
        return Ok(Redirect::to(LIST));
    }

    let input = forms::supplier_input(&form)?;
    supplier::update_supplier(&state.database, id, input, form.checkbox("active")).await?;
    Ok(Redirect::to(LIST))
}

async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>> {
    let supplier = supplier::require_supplier(&state.database, id).await?;
    let items = supplier::get_items_for_supplier(&state.database, id).await?;

    let mut context = Context::new();
    context.insert("supplier", &supplier);
    context.insert("items", &items);
    state.views.render("suppliers/delete.html", context)
}

async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Redirect> {
    supplier::delete_supplier(&state.database, id).await?;
    Ok(Redirect::to(LIST))
}
