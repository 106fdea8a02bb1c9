use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, LogLevel, get_logger};

pub mod app;
pub mod application;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod presentation;
pub mod time_utils;

/// Install the browser logger, clock and panic hook.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::for_build());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    get_logger().record(
        LogLevel::Info,
        LogComponent::Presentation("Initialize"),
        format_args!("🚀 trade dashboard initialized"),
    );
}

/// Mount the Leptos dashboard into `<body>`.
#[wasm_bindgen(js_name = mountDashboard)]
pub fn mount_dashboard() {
    leptos::mount_to_body(app::App);
}
