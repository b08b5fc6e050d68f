//! Browser extension glue: content script and background script.
//!
//! Built as a `cdylib` for `wasm32-unknown-unknown` with the `browser`
//! feature. Both extension contexts load the same module and call their own
//! entry point. Without the feature only the pure [`markup`] helpers are
//! compiled, so the crate still builds and tests natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`markup`] | Class names, overlay skeleton, row keys |
//! | `chrome` | `Reflect`-based access to `chrome.*` APIs |
//! | `http` | `HttpClient` over `gloo-net` |
//! | `storage` | `KeyValueStore` over `chrome.storage.local` |
//! | `auth` | `AuthFlow` over `chrome.identity` |
//! | `runtime` | Token messages between content and background |
//! | `dom` | `OverlayHost` over the page DOM |
//! | `selector_view` | Selector and feedback rendering |
//! | `content` | Content-script wiring and timers |
//! | `background` | Background-script token service |

pub mod markup;

#[cfg(feature = "browser")]
mod auth;
#[cfg(feature = "browser")]
mod background;
#[cfg(feature = "browser")]
mod chrome;
#[cfg(feature = "browser")]
mod content;
#[cfg(feature = "browser")]
mod dom;
#[cfg(feature = "browser")]
mod http;
#[cfg(feature = "browser")]
mod runtime;
#[cfg(feature = "browser")]
mod selector_view;
#[cfg(feature = "browser")]
mod storage;

#[cfg(feature = "browser")]
use wasm_bindgen::prelude::*;

/// Install the panic hook and console logger, and load configuration.
#[cfg(feature = "browser")]
fn init() -> Result<boards::config::ApiConfig, JsValue> {
    console_error_panic_hook::set_once();
    let config = boards::config::ApiConfig::from_build_env().map_err(|e| JsValue::from_str(&e.to_string()))?;
    if let Err(e) = console_log::init_with_level(config.log_level) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already set: {e}")));
    }
    Ok(config)
}

/// Entry point for the content script.
///
/// # Errors
///
/// Returns the JS error if configuration or listener setup fails.
#[cfg(feature = "browser")]
#[wasm_bindgen]
pub fn start_content() -> Result<(), JsValue> {
    let config = init()?;
    content::start(config)
}

/// Entry point for the background script.
///
/// # Errors
///
/// Returns the JS error if configuration or listener setup fails.
#[cfg(feature = "browser")]
#[wasm_bindgen]
pub fn start_background() -> Result<(), JsValue> {
    let config = init()?;
    background::start(config)
}
