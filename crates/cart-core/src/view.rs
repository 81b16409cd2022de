//! Drawer View
//!
//! Stateless snapshot -> view tree. The host re-renders the whole tree
//! from each fresh cart; nothing here keeps state between calls.

use crate::config::WidgetConfig;
use crate::models::{format_money, Cart, LineItem};

#[derive(Debug, Clone, PartialEq)]
pub struct DrawerView {
    pub rows: Vec<DrawerRow>,
    /// Shown instead of rows when the cart is empty
    pub empty_message: Option<String>,
    pub footer: DrawerFooter,
    pub has_items: bool,
    /// Badge count
    pub item_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawerRow {
    pub key: String,
    pub image: Option<String>,
    pub product_title: String,
    pub variant_title: Option<String>,
    pub quantity: u32,
    /// Formatted line price including the currency symbol
    pub line_price: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawerFooter {
    pub total: String,
    pub links: Vec<DrawerLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawerLink {
    pub href: String,
    pub label: &'static str,
    pub primary: bool,
}

fn price(config: &WidgetConfig, cents: u64) -> String {
    format!("{}{}", config.currency_symbol, format_money(cents))
}

fn row(item: &LineItem, config: &WidgetConfig) -> DrawerRow {
    DrawerRow {
        key: item.key.clone(),
        image: item.image.clone().filter(|src| !src.is_empty()),
        product_title: item.product_title.clone(),
        variant_title: item.variant_title.clone().filter(|t| !t.is_empty()),
        quantity: item.quantity,
        line_price: price(config, item.final_line_price),
    }
}

/// Render a cart snapshot
pub fn render_drawer(cart: &Cart, config: &WidgetConfig) -> DrawerView {
    let rows: Vec<DrawerRow> = cart.items.iter().map(|item| row(item, config)).collect();
    let has_items = !rows.is_empty();

    DrawerView {
        empty_message: (!has_items).then(|| config.empty_message.clone()),
        rows,
        footer: DrawerFooter {
            total: price(config, cart.total_price),
            links: vec![
                DrawerLink {
                    href: config.routes.cart_page.clone(),
                    label: "View cart",
                    primary: false,
                },
                DrawerLink {
                    href: config.routes.checkout_page.clone(),
                    label: "Check out",
                    primary: true,
                },
            ],
        },
        has_items,
        item_count: cart.item_count,
    }
}
