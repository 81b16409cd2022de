//! Cart Models
//!
//! Data structures matching the storefront `/cart.js` snapshot.
//! Prices are integer minor units (cents) exactly as the platform sends them.

use serde::{Deserialize, Serialize};

/// Cart snapshot (owned by the platform, never built locally outside tests)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cart {
    #[serde(default)]
    pub token: Option<String>,
    pub total_price: u64,
    pub item_count: u32,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a line by its key
    pub fn line(&self, key: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.key == key)
    }
}

/// One line of the cart snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub key: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub variant_id: Option<u64>,
    pub quantity: u32,
    pub product_title: String,
    /// `null` for single-variant products
    #[serde(default)]
    pub variant_title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub final_line_price: u64,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Format minor units as a two-decimal amount ("1234" -> "12.34")
pub fn format_money(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "0.00");
        assert_eq!(format_money(5), "0.05");
        assert_eq!(format_money(1999), "19.99");
        assert_eq!(format_money(250000), "2500.00");
    }

    #[test]
    fn test_parse_cart_snapshot() {
        let json = r#"{
            "token": "abc",
            "note": null,
            "total_price": 5000,
            "item_count": 2,
            "currency": "USD",
            "items": [{
                "id": 111,
                "key": "111:deadbeef",
                "variant_id": 111,
                "quantity": 2,
                "product_title": "Custom Tee",
                "variant_title": "Black / M / Front Design Only",
                "image": "https://cdn.example.com/tee.jpg",
                "url": "/products/tee?variant=111",
                "final_line_price": 5000,
                "properties": {"_custom_order": "Yes"}
            }]
        }"#;

        let cart: Cart = serde_json::from_str(json).expect("valid snapshot");
        assert_eq!(cart.item_count, 2);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.line("111:deadbeef").map(|l| l.quantity), Some(2));
        assert!(cart.line("missing").is_none());
    }

    #[test]
    fn test_parse_line_without_variant_title_or_image() {
        let json = r#"{"total_price": 0, "item_count": 1, "items": [
            {"key": "k", "quantity": 1, "product_title": "Gift card",
             "variant_title": null, "image": null, "final_line_price": 0}
        ]}"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.items[0].variant_title, None);
        assert_eq!(cart.items[0].image, None);
    }
}
