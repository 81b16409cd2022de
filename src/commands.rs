//! Cart Command Wrappers
//!
//! Frontend bindings to the storefront cart API. One client per page,
//! created from the loaded config on first use.

use std::cell::OnceCell;
use std::rc::Rc;

use ajax_cart_core::{
    build_add_payload, dispatch, Cart, CartAction, CartClient, CartResult, HttpTransport,
    WidgetConfig,
};

use crate::host::{self, HostResolver};

thread_local! {
    static CLIENT: OnceCell<Rc<CartClient<HttpTransport>>> = const { OnceCell::new() };
}

/// Bind the client to a config; later calls keep the first config
pub fn init(config: WidgetConfig) {
    CLIENT.with(|cell| {
        let _ = cell.set(Rc::new(CartClient::new(HttpTransport::new(), config)));
    });
}

fn client() -> Rc<CartClient<HttpTransport>> {
    CLIENT.with(|cell| {
        cell.get_or_init(|| {
            Rc::new(CartClient::new(HttpTransport::new(), crate::config::load_config()))
        })
        .clone()
    })
}

// ========================
// Commands
// ========================

pub async fn run(action: CartAction) -> CartResult<Cart> {
    let client = client();
    dispatch(&*client, action).await
}

pub async fn get_cart() -> CartResult<Cart> {
    run(CartAction::Refresh).await
}

/// Build the add payload from the page selection and submit it.
/// Validation failures return before any request is made.
pub async fn add_selection() -> CartResult<Cart> {
    let client = client();
    let config = client.config();
    let selection = host::read_selection(config)?;
    log::debug!("[Add] selection: {:?}", selection);

    let items = build_add_payload(
        &selection,
        &HostResolver::detect(),
        &config.default_color,
        config.max_design_layers,
    )?;
    dispatch(&*client, CartAction::Add(items)).await
}
