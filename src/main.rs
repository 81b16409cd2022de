//! AJAX Cart Drawer Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod host;
mod listeners;
mod logger;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(config::debug_enabled());

    let config = config::load_config();
    log::debug!("[App] config: {:?}", config);
    commands::init(config.clone());

    mount_to_body(move || view! { <App config=config /> });
}
