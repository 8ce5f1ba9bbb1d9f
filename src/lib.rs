mod app;
mod config;
mod dom;
mod error;
mod models;
mod router;
mod services;
mod utils;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::AppConfig;

// Keeps the App alive for the lifetime of the page.
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if AppConfig::from_env().is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::default());
    }
    log::info!("🏔️ LakeClean starting");

    let app = App::new()?;
    app.bootstrap()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });

    Ok(())
}
