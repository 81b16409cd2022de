//! AJAX Cart Core
//!
//! Platform-independent pieces of the cart drawer:
//! - models: cart snapshot as returned by the storefront
//! - payload: selection -> add-to-cart line item requests
//! - variant: variant lookup seam and the default catalog resolver
//! - client: read / add / change against the cart API
//! - view: stateless drawer rendering
//! - action: drawer command dispatch
//! - config: routes, labels and limits shared with the host page

mod action;
mod client;
mod config;
mod error;
mod models;
mod payload;
mod variant;
mod view;

pub use action::{dispatch, target_quantity, ActionId, CartAction, PendingLines};
pub use client::{
    AddRequest, CartClient, CartTransport, ChangeRequest, HttpTransport, TransportResponse,
};
pub use config::{Routes, WidgetConfig};
pub use error::{CartError, CartResult, RemoteErrorBody};
pub use models::{format_money, Cart, LineItem};
pub use payload::{
    build_add_payload, normalize_option, parse_size_quantity, BackOption, ColorValue,
    LineItemProperties, LineItemRequest, Selection,
};
pub use variant::{Variant, VariantCatalog, VariantResolver};
pub use view::{render_drawer, DrawerFooter, DrawerLink, DrawerRow, DrawerView};
