//! Page Listeners
//!
//! The only document-level wiring left: `[data-ajax-add]` triggers, the
//! legacy form submit blocker and Escape-to-close. Drawer controls bind
//! their own handlers.

use leptos::prelude::WithValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::context::{notify_error, CartContext};
use crate::host;
use crate::store::{store_close, store_show_cart};

const ADD_TRIGGER: &str = "[data-ajax-add]";
const LEGACY_FORMS: &str = ".product-form, [action*=\"/cart\"]";
const LEGACY_FORM_ID: &str = "AddToCartForm";
const BUSY_ATTR: &str = "data-ajax-busy";

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

fn event_element(ev: &web_sys::Event) -> Option<web_sys::Element> {
    ev.target()?.dyn_into::<web_sys::Element>().ok()
}

/// Bind all page listeners (call once)
pub fn bind_page_listeners(ctx: CartContext) {
    bind_add_triggers(ctx);
    bind_submit_block();
    bind_escape(ctx);
}

fn bind_add_triggers(ctx: CartContext) {
    let on_click = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let trigger = event_element(&ev).and_then(|el| el.closest(ADD_TRIGGER).ok().flatten());
        if let Some(trigger) = trigger {
            ev.prevent_default();
            handle_add(ctx, trigger);
        }
    });

    if let Some(doc) = document() {
        let _ = doc.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    }
    on_click.forget();
}

/// Legacy product forms would navigate to /cart; swallow them in the capture phase
fn bind_submit_block() {
    let on_submit = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        let Some(form) = event_element(&ev) else {
            return;
        };
        if form.id() == LEGACY_FORM_ID || form.matches(LEGACY_FORMS).unwrap_or(false) {
            ev.prevent_default();
            ev.stop_immediate_propagation();
        }
    });

    if let Some(doc) = document() {
        let _ = doc.add_event_listener_with_callback_and_bool(
            "submit",
            on_submit.as_ref().unchecked_ref(),
            true,
        );
    }
    on_submit.forget();
}

fn bind_escape(ctx: CartContext) {
    let on_keydown =
        Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Escape" {
                store_close(&ctx.store);
            }
        });

    if let Some(doc) = document() {
        let _ =
            doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    }
    on_keydown.forget();
}

fn set_trigger_busy(trigger: &web_sys::Element, busy: bool) {
    if let Some(button) = trigger.dyn_ref::<web_sys::HtmlButtonElement>() {
        button.set_disabled(busy);
    }
    if busy {
        let _ = trigger.set_attribute(BUSY_ATTR, "");
        let _ = trigger.set_attribute("aria-disabled", "true");
    } else {
        let _ = trigger.remove_attribute(BUSY_ATTR);
        let _ = trigger.remove_attribute("aria-disabled");
    }
}

/// What a trigger showed before it was relabelled
enum TriggerLabel {
    /// `<input type="submit">` shows its `value`
    Value(String),
    /// Anything else keeps its markup (icons included)
    Markup(String),
}

fn relabel_trigger(trigger: &web_sys::Element, label: &str) -> TriggerLabel {
    if let Some(input) = trigger.dyn_ref::<web_sys::HtmlInputElement>() {
        let original = input.value();
        input.set_value(label);
        TriggerLabel::Value(original)
    } else {
        let original = trigger.inner_html();
        trigger.set_text_content(Some(label));
        TriggerLabel::Markup(original)
    }
}

fn restore_trigger(trigger: &web_sys::Element, label: TriggerLabel) {
    match label {
        TriggerLabel::Value(value) => {
            if let Some(input) = trigger.dyn_ref::<web_sys::HtmlInputElement>() {
                input.set_value(&value);
            }
        }
        TriggerLabel::Markup(html) => trigger.set_inner_html(&html),
    }
}

/// Add-to-cart chain for one trigger: relabel + disable, build, submit,
/// render, then restore the trigger whatever happened
fn handle_add(ctx: CartContext, trigger: web_sys::Element) {
    if trigger.has_attribute(BUSY_ATTR) {
        return;
    }
    let label = relabel_trigger(&trigger, &ctx.config.with_value(|c| c.adding_label.clone()));
    set_trigger_busy(&trigger, true);

    spawn_local(async move {
        match commands::add_selection().await {
            Ok(cart) => {
                log::debug!("[Add] cart now has {} items", cart.item_count);
                store_show_cart(&ctx.store, cart);
                host::close_customization_modal();
            }
            Err(e) => notify_error(&e),
        }
        restore_trigger(&trigger, label);
        set_trigger_busy(&trigger, false);
    });
}
