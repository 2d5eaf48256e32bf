//! Leptos frontend (browser build).

pub mod app;
pub mod views;

use ::tracing::error;
use leptos::*;
use wasm_bindgen::prelude::*;

use protrack_client::{ClientConfig, config};
use protrack_observability::{LogConfig, LogFormat};

use crate::context::AppContext;

use self::app::App;

/// Configuration baked in at build time (`PROTRACK_*` variables).
fn build_config() -> ClientConfig {
    let lookup = |key: &str| -> Option<String> {
        let value = match key {
            config::API_URL_VAR => option_env!("PROTRACK_API_URL"),
            config::TIMEOUT_VAR => option_env!("PROTRACK_REQUEST_TIMEOUT_SECS"),
            config::LOGIN_PATH_VAR => option_env!("PROTRACK_LOGIN_PATH"),
            _ => None,
        };
        value.map(str::to_string)
    };

    ClientConfig::from_lookup(lookup).unwrap_or_else(|e| {
        error!(error = %e, "invalid build configuration; using defaults");
        ClientConfig::default()
    })
}

/// WASM entry point for the frontend.
/// This is called automatically when the WASM module loads.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    protrack_observability::tracing::init(&LogConfig {
        default_filter: option_env!("PROTRACK_LOG").unwrap_or("info").to_string(),
        format: LogFormat::Pretty,
    });

    match AppContext::connect(build_config()) {
        Ok(ctx) => mount_to_body(move || view! { <App ctx=ctx/> }),
        Err(e) => {
            error!(error = %e, "failed to start application");
            mount_to_body(|| {
                view! { <p class="fatal">"The application could not start. Please reload."</p> }
            });
        }
    }
}
