//! Menu routes: list, add, detail, edit, delete.
//!
//! Add and edit forms carry the selected inventory items as a repeated `items` field.

use super::{flag, non_blank};
use crate::{
    core::{
        inventory,
        menu::{self, MenuFilter},
    },
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

const LIST: &str = "/menu/";

/// Menu routes, mounted at the application root.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST, get(list))
        .route("/menu/add/", get(add_form).post(add))
        .route("/menu/:id/", get(detail))
        .route("/menu/edit/:id/", get(edit_form))
        .route("/menu/edit/submit/", get(to_list).post(edit_submit))
        .route("/menu/delete/:id/", get(confirm_delete).post(delete))
}

/// Listing filters from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    category: Option<String>,
    available: Option<String>,
    size: Option<String>,
    q: Option<String>,
}

impl From<ListQuery> for MenuFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            category: non_blank(query.category),
            available: flag(query.available.as_deref()),
            size: non_blank(query.size),
            search: non_blank(query.q),
        }
    }
}

/// Inventory item as offered on the menu form.
#[derive(Debug, Serialize)]
struct ItemOption {
    id: i32,
    label: String,
    selected: bool,
}

async fn item_options(state: &AppState, selected: &[i32]) -> Result<Vec<ItemOption>> {
    Ok(inventory::get_all_items(&state.database)
        .await?
        .into_iter()
        .map(|item| ItemOption {
            id: item.id,
            label: item.label(),
            selected: selected.contains(&item.id),
        })
        .collect())
}

async fn to_list() -> Redirect {
    Redirect::to(LIST)
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>> {
    let filter = MenuFilter::from(query);
    let products = menu::find_menu_products(&state.database, &filter).await?;

    let mut context = Context::new();
    context.insert("products", &products);
    context.insert("filter_category", &filter.category);
    context.insert("filter_available", &filter.available);
    context.insert("filter_size", &filter.size);
    context.insert("filter_q", &filter.search);
    state.views.render("menu/list.html", context)
}

async fn add_form(State(state): State<AppState>) -> Result<Html<String>> {
    let mut context = Context::new();
    context.insert("items", &item_options(&state, &[]).await?);
    state.views.render("menu/form.html", context)
}

async fn add(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let (input, item_ids) = forms::menu_input(&pairs.into())?;
    menu::create_menu_product(&state.database, input, &item_ids).await?;
    Ok(Redirect::to(LIST))
}

async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let product = menu::require_menu_product(&state.database, id).await?;
    let items: Vec<String> = menu::get_items_for_product(&state.database, &product)
        .await?
        .iter()
        .map(|item| item.label())
        .collect();

    let mut context = Context::new();
    context.insert("label", &product.label());
    context.insert("product", &product);
    context.insert("items", &items);
    state.views.render("menu/detail.html", context)
}

async fn edit_form(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let product = menu::require_menu_product(&state.database, id).await?;
    let selected: Vec<i32> = menu::get_items_for_product(&state.database, &product)
        .await?
        .into_iter()
        .map(|item| item.id)
        .collect();

    let mut context = Context::new();
    context.insert("items", &item_options(&state, &selected).await?);
    context.insert("product", &product);
    state.views.render("menu/form.html", context)
}

async fn edit_submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let form = forms::FormFields::from(pairs);
    let Some(id) = form.id("id") else {
        warn!("Menu edit submitted without a usable id");
        return Ok(Redirect::to(LIST));
    };
    if menu::get_menu_product_by_id(&state.database, id).await?.is_none() {
        warn!(product_id = id, "Menu edit submitted for a missing record");
        return Ok(Redirect::to(LIST));
    }

    let (input, item_ids) = forms::menu_input(&form)?;
    menu::update_menu_product(&state.database, id, input, &item_ids).await?;
    Ok(Redirect::to(LIST))
}

async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>> {
    let product = menu::require_menu_product(&state.database, id).await?;

    let mut context = Context::new();
    context.insert("label", &product.label());
    context.insert("product", &product);
    state.views.render("menu/delete.html", context)
}

async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Redirect> {
    menu::delete_menu_product(&state.database, id).await?;
    Ok(Redirect::to(LIST))
}
