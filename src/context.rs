//! Cart Context
//!
//! Store + config handle provided via Leptos Context API, plus the
//! async chains every drawer gesture runs through.

use ajax_cart_core::{Cart, CartAction, CartError, CartResult, WidgetConfig};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::host;
use crate::store::{store_begin_line, store_finish_line, store_show_cart, DrawerStore};

#[derive(Clone, Copy)]
pub struct CartContext {
    pub store: DrawerStore,
    pub config: StoredValue<WidgetConfig>,
}

impl CartContext {
    pub fn new(store: DrawerStore, config: WidgetConfig) -> Self {
        Self {
            store,
            config: StoredValue::new(config),
        }
    }

    /// Run a step/remove action for one line. A second gesture on the same
    /// line while the first is in flight is dropped.
    pub fn run_line_action(&self, action: CartAction) {
        let Some(key) = action.line_key().map(str::to_string) else {
            return;
        };
        let store = self.store;
        if let Err(e) = store_begin_line(&store, &key) {
            log::debug!("[Drawer] {}", e);
            return;
        }
        spawn_local(async move {
            let result = commands::run(action).await;
            store_finish_line(&store, &key);
            show_result(&store, result);
        });
    }
}

pub fn use_cart_context() -> CartContext {
    use_context::<CartContext>().expect("CartContext should be provided")
}

/// Render a fresh snapshot or tell the user what went wrong
pub fn show_result(store: &DrawerStore, result: CartResult<Cart>) {
    match result {
        Ok(cart) => store_show_cart(store, cart),
        Err(e) => notify_error(&e),
    }
}

pub fn notify_error(error: &CartError) {
    if error.is_validation() {
        log::debug!("[Drawer] rejected before request: {}", error);
    } else {
        log::warn!("[Drawer] {}", error);
    }
    host::alert(&error.user_message());
}
