//! Host-shell integration
//!
//! The embedding app exposes a single fire-and-forget "back" action.

/// Navigation hooks provided by the host
pub trait HostShell {
    fn navigate_back(&self);
}

/// Shell for hosts without navigation: just logs the request
#[derive(Debug, Default)]
pub struct LogShell;

impl HostShell for LogShell {
    fn navigate_back(&self) {
        log::info!("navigate back requested (no host shell)");
    }
}

/// Mini-app host: navigation is a special URL
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct WebShell;

#[cfg(target_arch = "wasm32")]
impl WebShell {
    const BACK_URL: &'static str = "ixian:back";
}

#[cfg(target_arch = "wasm32")]
impl HostShell for WebShell {
    fn navigate_back(&self) {
        let Some(window) = web_sys::window() else {
            log::warn!("navigate back: no window");
            return;
        };
        if window.location().set_href(Self::BACK_URL).is_err() {
            log::warn!("navigate back: host refused {}", Self::BACK_URL);
        }
    }
}
