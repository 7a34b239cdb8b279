//! Request handlers, one module per route family.

/// Landing page and health check
pub mod home;
/// `/inventory/` routes
pub mod inventory;
/// `/menu/` routes
pub mod menu;
/// `/suppliers/` routes
pub mod suppliers;

/// Query-string value, `None` when missing or blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Yes/no query-string flag; anything unrecognised means "don't filter".
fn flag(value: Option<&str>) -> Option<bool> {
    match value.map(str::trim) {
        Some("true" | "1" | "yes" | "on") => Some(true),
        Some("false" | "0" | "no" | "off") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag() {
        assert_eq!(flag(Some("true")), Some(true));
        assert_eq!(flag(Some(" 0 ")), Some(false));
        assert_eq!(flag(Some("")), None);
        assert_eq!(flag(Some("maybe")), None);
        assert_eq!(flag(None), None);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  kg ".to_string())), Some("kg".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
