//! Drawer State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The cart field
//! only ever holds the last snapshot returned by the server.

use ajax_cart_core::{Cart, CartResult, PendingLines};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::host;

#[derive(Clone, Debug, Default, Store)]
pub struct DrawerState {
    /// Last server snapshot (None until the first response)
    pub cart: Option<Cart>,
    /// Drawer visibility
    pub open: bool,
    /// Lines with a change in flight
    pub pending: PendingLines,
}

/// Type alias for the store
pub type DrawerStore = Store<DrawerState>;

// ========================
// Store Helper Functions
// ========================

/// Replace the snapshot, refresh the page bubble and open the drawer
pub fn store_show_cart(store: &DrawerStore, cart: Cart) {
    host::update_bubble(cart.item_count);
    *store.cart().write() = Some(cart);
    *store.open().write() = true;
}

/// Replace the snapshot without opening (initial load)
pub fn store_set_cart(store: &DrawerStore, cart: Cart) {
    host::update_bubble(cart.item_count);
    *store.cart().write() = Some(cart);
}

pub fn store_close(store: &DrawerStore) {
    *store.open().write() = false;
}

/// Claim a line for a change; `LineBusy` if one is already in flight
pub fn store_begin_line(store: &DrawerStore, key: &str) -> CartResult<()> {
    store.pending().write().try_begin(key)
}

pub fn store_finish_line(store: &DrawerStore, key: &str) {
    store.pending().write().finish(key);
}
