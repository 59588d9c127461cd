#![allow(warnings)]
//! Inventar Frontend Entry Point

mod api;
mod app;
mod browser;
mod components;
mod config;
mod context;
mod editor;
mod guard;
mod models;
mod selection;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = config::init();
    if let Err(e) = console_logger::init(config.log_level) {
        web_sys::console::error_1(&format!("[MAIN] logger already installed: {}", e).into());
    }
    log::info!("starting, backend at {}", config.api_base);
    mount_to_body(App);
}
