#[macro_use]
mod utils;

mod app;
mod components;
mod config;
mod models;
mod services;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn run_app() {
    utils::set_panic_hook();
    app::start();
}
