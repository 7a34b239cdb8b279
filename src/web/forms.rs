//! Form submissions turned into typed service inputs.
//!
//! Submissions arrive as raw key/value pairs so repeated keys (the menu `items`
//! field) and bare checkbox keys survive intact. Each `*_input` function validates
//! the fields it needs and produces the matching `core` input struct.
//!
//! Text fields are trimmed; an empty optional field becomes `None`. Numeric and date
//! fields that fail to parse are rejected with [`Error::Validation`]. Identifier fields
//! that fail to parse are treated as absent references.

use crate::{
    core::{inventory::InventoryInput, menu::MenuInput, supplier::SupplierInput},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Raw `application/x-www-form-urlencoded` body, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl FormFields {
    /// First raw value submitted under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every raw value submitted under `key`.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Checkbox semantics: the key being present at all means `true`.
    #[must_use]
    pub fn checkbox(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Trimmed value, `None` when missing or blank.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
    }

    /// Trimmed value that must be present and non-blank.
    pub fn required_text(&self, key: &'static str) -> Result<String> {
        self.text(key)
            .ok_or_else(|| Error::invalid(key, "This field is required"))
    }

    /// Decimal value; missing or blank means zero.
    pub fn decimal_or_zero(&self, key: &'static str) -> Result<Decimal> {
        self.text(key)
            .map_or(Ok(Decimal::ZERO), |raw| parse_decimal(key, &raw))
    }

    /// Decimal value that must be present.
    pub fn required_decimal(&self, key: &'static str) -> Result<Decimal> {
        let raw = self.required_text(key)?;
        parse_decimal(key, &raw)
    }

    /// `YYYY-MM-DD` date; missing or blank means absent.
    pub fn optional_date(&self, key: &'static str) -> Result<Option<NaiveDate>> {
        self.text(key)
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| Error::invalid(key, format!("'{raw}' is not a date (YYYY-MM-DD)")))
            })
            .transpose()
    }

    /// Record identifier; missing, blank, or non-numeric means absent.
    #[must_use]
    pub fn id(&self, key: &str) -> Option<i32> {
        self.text(key).and_then(|raw| raw.parse().ok())
    }

    /// Every parseable identifier submitted under `key`.
    #[must_use]
    pub fn ids(&self, key: &str) -> Vec<i32> {
        self.get_all(key)
            .filter_map(|raw| raw.trim().parse().ok())
            .collect()
    }
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal> {
    let value = Decimal::from_str(raw)
        .map_err(|_| Error::invalid(field, format!("'{raw}' is not a number")))?;
    if value.scale() > 2 {
        return Err(Error::invalid(field, "At most two decimal places are allowed"));
    }
    Ok(value)
}

/// Reads the supplier fields of an add or edit form.
pub fn supplier_input(form: &FormFields) -> Result<SupplierInput> {
    Ok(SupplierInput {
        name: form.required_text("name")?,
        phone: form.text("phone"),
        email: form.text("email"),
        address: form.text("address"),
        product_type: form.text("product_type"),
        tax_id: form.text("tax_id"),
    })
}

/// Reads the inventory fields of an add or edit form.
pub fn inventory_input(form: &FormFields) -> Result<InventoryInput> {
    Ok(InventoryInput {
        name: form.required_text("name")?,
        stock: form.decimal_or_zero("stock")?,
        unit: form.required_text("unit")?,
        last_purchase_on: form.optional_date("last_purchase_on")?,
        min_stock: form.decimal_or_zero("min_stock")?,
        unit_cost: form.decimal_or_zero("unit_cost")?,
        supplier_id: form.id("supplier"),
    })
}

/// Reads the menu fields of an add or edit form, plus the selected inventory items.
pub fn menu_input(form: &FormFields) -> Result<(MenuInput, Vec<i32>)> {
    let input = MenuInput {
        name: form.required_text("name")?,
        description: form.text("description"),
        price: form.required_decimal("price")?,
        category: form.required_text("category")?,
        size: form.text("size"),
        available: form.checkbox("available"),
    };
    Ok((input, form.ids("items")))
}
