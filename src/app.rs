//! AJAX Cart App
//!
//! Root component: owns the drawer store, wires the page listeners and
//! mounts the drawer.

use ajax_cart_core::WidgetConfig;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::CartDrawer;
use crate::context::CartContext;
use crate::listeners;
use crate::store::{store_set_cart, DrawerState};

#[component]
pub fn App(config: WidgetConfig) -> impl IntoView {
    let load_on_start = config.load_on_start;

    let store = Store::new(DrawerState::default());
    let ctx = CartContext::new(store, config);

    // Provide context to all children
    provide_context(ctx);

    listeners::bind_page_listeners(ctx);

    if load_on_start {
        spawn_local(async move {
            match commands::get_cart().await {
                Ok(cart) => store_set_cart(&store, cart),
                Err(e) => log::warn!("[App] initial cart load failed: {}", e),
            }
        });
    }

    view! { <CartDrawer /> }
}
