//! HTML views rendered with Tera.
//!
//! Templates are compiled into the binary and parsed once at startup. Every view
//! gets `today` in its context, shown in the page footer.

use crate::errors::Result;
use axum::response::Html;
use rust_decimal::Decimal;
use std::{collections::HashMap, str::FromStr};
use tera::{Context, Tera, Value};
use tracing::{debug, error};

macro_rules! template {
    ($name:literal) => {
        ($name, include_str!(concat!("../../templates/", $name)))
    };
}

const TEMPLATES: &[(&str, &str)] = &[
    template!("base.html"),
    template!("home.html"),
    template!("suppliers/list.html"),
    template!("suppliers/form.html"),
    template!("suppliers/detail.html"),
    template!("suppliers/delete.html"),
    template!("inventory/list.html"),
    template!("inventory/form.html"),
    template!("inventory/detail.html"),
    template!("inventory/delete.html"),
    template!("menu/list.html"),
    template!("menu/form.html"),
    template!("menu/detail.html"),
    template!("menu/delete.html"),
];

/// Compiled templates shared by all handlers.
#[derive(Debug)]
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Parses every built-in template.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Template`] if a template fails to parse.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        tera.register_filter("money", money);
        Ok(Self { tera })
    }

    /// Renders `name` with `context`.
    pub fn render(&self, name: &str, mut context: Context) -> Result<Html<String>> {
        context.insert("today", &chrono::Local::now().date_naive());
        debug!(template = name, "Rendering view");
        self.tera.render(name, &context).map(Html).map_err(|e| {
            error!("Could not render template {}: {}", name, e);
            e.into()
        })
    }
}

/// Formats a decimal (serialized as a string or number) with two places.
fn money(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let decimal = match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::Null => return Ok(Value::String(String::new())),
        _ => None,
    };
    decimal
        .map(|d| Value::String(format!("{d:.2}")))
        .ok_or_else(|| tera::Error::msg(format!("money filter expects a number, got {value}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_all_templates_parse() {
        let views = Views::new().unwrap();
        let names: Vec<_> = views.tera.get_template_names().collect();
        assert_eq!(names.len(), TEMPLATES.len());
    }

    #[test]
    fn test_money_filter() {
        let args = HashMap::new();
        assert_eq!(
            money(&Value::String("12.5".to_string()), &args).unwrap(),
            Value::String("12.50".to_string())
        );
        assert_eq!(
            money(&serde_json_number(3), &args).unwrap(),
            Value::String("3.00".to_string())
        );
        assert!(money(&Value::Bool(true), &args).is_err());
    }

    #[test]
    fn test_add_form_renders_without_record() {
        let views = Views::new().unwrap();
        let Html(body) = views.render("suppliers/form.html", Context::new()).unwrap();
        assert!(body.contains("action=\"/suppliers/add/\""));
        assert!(!body.contains("name=\"active\""));
    }

    fn serde_json_number(n: i64) -> Value {
        Value::Number(n.into())
    }
}
