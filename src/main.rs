//! To-Do Popup Entry Point

mod config;
mod logger;
mod storage;
mod store;
mod context;
mod components;
mod app;

use app::App;
use config::PopupConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = PopupConfig::default();
    logger::init(config.log_level);
    log::info!("popup starting, storage area '{}'", config.storage_area.as_str());

    mount_to_body(move || view! { <App config=config.clone() /> });
}
