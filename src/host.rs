//! Host Page Bindings
//!
//! Everything the storefront page supplies: the variant lookup, color
//! getters, size picker state and design layers. Read once per click and
//! handed to the payload builder as a plain `Selection`.

use ajax_cart_core::{
    parse_size_quantity, BackOption, CartResult, ColorValue, Selection, Variant, VariantCatalog,
    VariantResolver, WidgetConfig,
};
use wasm_bindgen::{JsCast, JsValue};

const BACK_VIEW_CHECKBOX: &str = "#backViewFrontBack";
const CUSTOMIZATION_MODAL: &str = "customizationModal";
const CART_COUNT: &str = "[data-cart-count]";

// ========================
// Globals
// ========================

fn global(name: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn global_fn(name: &str) -> Option<js_sys::Function> {
    global(name)?.dyn_into::<js_sys::Function>().ok()
}

/// Call a zero-arg color getter; `null`/`""`/throwing all mean "no color"
fn color_from(getter: &str) -> Option<ColorValue> {
    let value = global_fn(getter)?.call0(&JsValue::NULL).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    serde_wasm_bindgen::from_value(value).ok()
}

/// Sizes with a positive quantity, in insertion order. Pickers may store
/// numbers or the raw `input.value` string.
fn selected_sizes() -> CartResult<Vec<(String, u32)>> {
    let Some(object) = global("selectedSizes").and_then(|v| v.dyn_into::<js_sys::Object>().ok())
    else {
        return Ok(Vec::new());
    };
    let mut sizes = Vec::new();
    for entry in js_sys::Object::entries(&object).iter() {
        let Ok(pair) = entry.dyn_into::<js_sys::Array>() else {
            continue;
        };
        let Some(size) = pair.get(0).as_string() else {
            continue;
        };
        let raw: serde_json::Value =
            serde_wasm_bindgen::from_value(pair.get(1)).unwrap_or(serde_json::Value::Null);
        let quantity = parse_size_quantity(&size, &raw)?;
        if quantity > 0 {
            sizes.push((size, quantity));
        }
    }
    Ok(sizes)
}

fn design_layers() -> Vec<serde_json::Value> {
    global("customizationLayers")
        .and_then(|v| serde_wasm_bindgen::from_value(v).ok())
        .unwrap_or_default()
}

fn back_view_checked() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(BACK_VIEW_CHECKBOX).ok().flatten())
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.checked())
        .unwrap_or(false)
}

/// Snapshot the page's current selection
pub fn read_selection(config: &WidgetConfig) -> CartResult<Selection> {
    let color = ColorValue::resolve(
        color_from("getSelectedModalColorValue"),
        color_from("getSelectedColorFromForm"),
        &config.default_color,
    );
    Ok(Selection {
        color: Some(color),
        sizes: selected_sizes()?,
        back: BackOption::from_checked(back_view_checked()),
        design_layers: design_layers(),
    })
}

// ========================
// Variant Lookup
// ========================

/// Page-level resolver: `window.findVariant`, else a catalog built from
/// `window.ajaxCartProduct`
pub enum HostResolver {
    Page(js_sys::Function),
    Catalog(VariantCatalog),
    Missing,
}

impl HostResolver {
    pub fn detect() -> Self {
        if let Some(find) = global_fn("findVariant") {
            return HostResolver::Page(find);
        }
        let catalog = global("ajaxCartProduct")
            .and_then(|v| serde_wasm_bindgen::from_value::<serde_json::Value>(v).ok())
            .map(VariantCatalog::from_product_value);
        match catalog {
            Some(Ok(catalog)) if catalog.is_empty() => {
                log::warn!("[Host] ajaxCartProduct has no variants");
                HostResolver::Missing
            }
            Some(Ok(catalog)) => {
                log::debug!("[Host] catalog with {} variants", catalog.len());
                HostResolver::Catalog(catalog)
            }
            Some(Err(e)) => {
                log::warn!("[Host] ajaxCartProduct is not a product: {}", e);
                HostResolver::Missing
            }
            None => {
                log::warn!("[Host] no findVariant and no ajaxCartProduct on the page");
                HostResolver::Missing
            }
        }
    }
}

impl VariantResolver for HostResolver {
    fn find_variant(&self, color: &str, size: &str, back: &str) -> Option<Variant> {
        match self {
            HostResolver::Page(find) => {
                let found = find
                    .call3(
                        &JsValue::NULL,
                        &JsValue::from_str(color),
                        &JsValue::from_str(size),
                        &JsValue::from_str(back),
                    )
                    .ok()?;
                if found.is_undefined() || found.is_null() {
                    return None;
                }
                serde_wasm_bindgen::from_value(found).ok()
            }
            HostResolver::Catalog(catalog) => catalog.find_variant(color, size, back),
            HostResolver::Missing => None,
        }
    }
}

// ========================
// Page Effects
// ========================

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn close_customization_modal() {
    if let Some(modal) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CUSTOMIZATION_MODAL))
    {
        let _ = modal.class_list().remove_1("show");
    }
}

/// Write the item count into every cart bubble on the page
pub fn update_bubble(count: u32) {
    let Some(nodes) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector_all(CART_COUNT).ok())
    else {
        return;
    };
    let text = count.to_string();
    for i in 0..nodes.length() {
        if let Some(node) = nodes.item(i) {
            node.set_text_content(Some(&text));
        }
    }
}
