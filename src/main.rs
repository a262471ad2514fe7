//! Propostas Frontend Entry Point

mod accordion;
mod api;
mod app;
mod components;
mod config;
mod context;
mod dashboard;
mod error;
mod forms;
mod ids;
mod items;
mod models;
mod notify;
mod store;
mod validation;
mod wizard;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = rolling_logger::init(rolling_logger::DEFAULT_CAPACITY, log::LevelFilter::Info) {
        web_sys::console::error_1(&format!("logger already installed: {}", err).into());
    }
    mount_to_body(App);
}
