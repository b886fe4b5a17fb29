//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Raw input events to game commands
//! - Host-shell navigation

pub mod input;
pub mod shell;

pub use input::{Key, RawInput, map_input};
pub use shell::{HostShell, LogShell};
#[cfg(target_arch = "wasm32")]
pub use shell::WebShell;

/// Route `log` to the browser console and panics to `console.error`
#[cfg(target_arch = "wasm32")]
pub fn init_web_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
}
