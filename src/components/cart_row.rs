//! Cart Row Component
//!
//! One line item with quantity steppers and a remove button.

use ajax_cart_core::{CartAction, DrawerRow};
use leptos::prelude::*;

use crate::context::use_cart_context;
use crate::store::DrawerStateStoreFields;

#[component]
pub fn CartRow(row: DrawerRow) -> impl IntoView {
    let ctx = use_cart_context();
    let store = ctx.store;

    let key = row.key.clone();
    let quantity = row.quantity;

    let busy = {
        let key = key.clone();
        move || store.pending().read().contains(&key)
    };

    // Controls carry their action in `data-action`, steppers their delta in `data-d`
    let on_control = {
        let key = key.clone();
        move |ev: web_sys::MouseEvent| {
            ev.prevent_default();
            let control = event_target::<web_sys::Element>(&ev);
            let Some(data_action) = control.get_attribute("data-action") else {
                return;
            };
            // Latest snapshot wins over the quantity this row was rendered with
            let current = store
                .cart()
                .with_untracked(|cart| cart.as_ref()?.line(&key).map(|line| line.quantity))
                .unwrap_or(quantity);
            let data_d = control.get_attribute("data-d");
            if let Some(action) =
                CartAction::from_control(&data_action, key.clone(), current, data_d.as_deref())
            {
                ctx.run_line_action(action);
            }
        }
    };

    let row_key = key.clone();
    let row_busy = busy.clone();
    let dec_busy = busy.clone();
    let inc_busy = busy.clone();

    view! {
        <div class="ajax-cart-item" data-key=row_key class:busy=row_busy>
            {row.image.map(|src| view! { <img src=src alt="" /> })}
            <div>
                <strong>{row.product_title}</strong>
                <br />
                {row.variant_title.map(|title| view! { <span class="ajax-cart-variant">{title}" "</span> })}
                "× "{quantity}
                <br />
                {row.line_price}
                <div class="ajax-cart-qty">
                    <button
                        data-action="step"
                        data-d="-1"
                        aria-label="Decrease"
                        disabled=dec_busy
                        on:click=on_control.clone()
                    >
                        "−"
                    </button>
                    <input type="number" min="0" readonly=true value=quantity />
                    <button
                        data-action="step"
                        data-d="1"
                        aria-label="Increase"
                        disabled=inc_busy
                        on:click=on_control.clone()
                    >
                        "+"
                    </button>
                </div>
            </div>
            <button
                class="ajax-cart-remove"
                data-action="remove"
                data-key=key
                aria-label="Remove"
                disabled=busy
                on:click=on_control
            >
                "×"
            </button>
        </div>
    }
}
