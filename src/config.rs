//! Widget Configuration Loader
//!
//! Reads `window.AjaxCartConfig` (all fields optional) and pins the API
//! base to the page origin when none is given.

use ajax_cart_core::WidgetConfig;
use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "AjaxCartConfig";

pub fn load_config() -> WidgetConfig {
    let Some(window) = web_sys::window() else {
        return WidgetConfig::default();
    };

    let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .unwrap_or(JsValue::UNDEFINED);
    let config = if raw.is_undefined() || raw.is_null() {
        WidgetConfig::default()
    } else {
        serde_wasm_bindgen::from_value(raw).unwrap_or_else(|e| {
            log::warn!("[Config] ignoring invalid {}: {}", CONFIG_GLOBAL, e);
            WidgetConfig::default()
        })
    };

    match window.location().origin() {
        Ok(origin) if config.base_url.is_empty() => config.with_base_url(origin),
        _ => config,
    }
}

/// `?cart_debug` in the page URL turns on debug logging
pub fn debug_enabled() -> bool {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .map(|search| search.contains("cart_debug"))
        .unwrap_or(false)
}
