//! Widget Configuration
//!
//! Every field has a default so a page can override only what it needs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Origin prepended to every route; empty means "same origin"
    pub base_url: String,
    pub routes: Routes,
    pub currency_symbol: String,
    /// Color used when neither the modal nor the page form has one
    pub default_color: String,
    pub max_design_layers: usize,
    pub adding_label: String,
    pub empty_message: String,
    /// Fetch the cart once on start (drawer stays closed)
    pub load_on_start: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub cart_js: String,
    pub add_js: String,
    pub change_js: String,
    pub cart_page: String,
    pub checkout_page: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            routes: Routes::default(),
            currency_symbol: "$".to_string(),
            default_color: "Black".to_string(),
            max_design_layers: 5,
            adding_label: "Adding…".to_string(),
            empty_message: "Your cart is empty".to_string(),
            load_on_start: false,
        }
    }
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            cart_js: "/cart.js".to_string(),
            add_js: "/cart/add.js".to_string(),
            change_js: "/cart/change.js".to_string(),
            cart_page: "/cart".to_string(),
            checkout_page: "/checkout".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Absolute URL for an API route
    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), route)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: WidgetConfig = serde_json::from_str(
            r#"{"currency_symbol": "€", "routes": {"cart_page": "/bag"}}"#,
        )
        .unwrap();
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.routes.cart_page, "/bag");
        assert_eq!(config.routes.add_js, "/cart/add.js");
        assert_eq!(config.max_design_layers, 5);
        assert_eq!(config.default_color, "Black");
    }

    #[test]
    fn test_url_joins_base() {
        let config = WidgetConfig::default().with_base_url("https://shop.example.com/");
        assert_eq!(config.url("/cart.js"), "https://shop.example.com/cart.js");
        assert_eq!(WidgetConfig::default().url("/cart.js"), "/cart.js");
    }
}
