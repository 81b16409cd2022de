//! Cart Drawer Component
//!
//! Slide-out panel. Re-renders entirely from the latest snapshot.

use ajax_cart_core::{render_drawer, Cart, DrawerView};
use leptos::prelude::*;

use crate::components::{CartRow, DrawerFooter};
use crate::context::use_cart_context;
use crate::store::{store_close, DrawerStateStoreFields};

#[component]
pub fn CartDrawer() -> impl IntoView {
    let ctx = use_cart_context();
    let store = ctx.store;
    let config = ctx.config;

    let drawer_view = Memo::new(move |_| -> DrawerView {
        let cart = store.cart().get().unwrap_or_else(Cart::default);
        config.with_value(|c| render_drawer(&cart, c))
    });

    view! {
        <div
            id="AjaxCartDrawer"
            class="ajax-cart-drawer"
            class:open=move || store.open().get()
            class:has-items=move || drawer_view.with(|v| v.has_items)
        >
            <div class="ajax-cart-header">
                <span>"Cart"</span>
                <span class="ajax-cart-count">{move || drawer_view.with(|v| v.item_count)}</span>
                <button
                    class="ajax-cart-close"
                    aria-label="Close"
                    on:click=move |_| store_close(&store)
                >
                    "×"
                </button>
            </div>

            <div class="ajax-cart-body">
                {move || {
                    let drawer = drawer_view.get();
                    match drawer.empty_message {
                        Some(message) => view! { <p class="ajax-cart-empty">{message}</p> }.into_any(),
                        None => drawer
                            .rows
                            .into_iter()
                            .map(|row| view! { <CartRow row=row /> })
                            .collect_view()
                            .into_any(),
                    }
                }}
            </div>

            {move || view! { <DrawerFooter footer=drawer_view.get().footer /> }}
        </div>
    }
}
