// src/platform/web.rs

//! Browser implementations of the platform traits.

use super::{ConnectivityEvent, ConnectivityProvider, Listener, LocationProvider, NavigationProvider, Subscription};
use std::cell::RefCell;
use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// `window.location` and `window.history.state`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocation;

impl LocationProvider for BrowserLocation {
    fn query_param(&self, key: &str) -> Option<String> {
        let search = web_sys::window()?.location().search().ok()?;
        let query = search.strip_prefix('?').unwrap_or(&search);
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.into_owned())
    }

    fn raw_fragment(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default()
    }

    fn navigation_state(&self) -> Option<serde_json::Value> {
        let state = web_sys::window()?.history().ok()?.state().ok()?;
        if state.is_undefined() || state.is_null() {
            return None;
        }
        let text = js_sys::JSON::stringify(&state).ok()?.as_string()?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring navigation state that is not JSON: {}", e);
                None
            }
        }
    }
}

/// `window.location.replace` and `window.onbeforeunload`.
#[derive(Default)]
pub struct BrowserNavigator {
    // Kept alive for as long as it is installed as the handler.
    unload_handler: RefCell<Option<Closure<dyn FnMut() -> JsValue>>>,
}

impl BrowserNavigator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NavigationProvider for BrowserNavigator {
    fn replace(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            warn!("No window available; dropping navigation to {}", url);
            return;
        };
        if let Err(e) = window.location().replace(url) {
            warn!("location.replace failed: {:?}", e);
        }
    }

    fn install_unload_confirmation(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handler = Closure::wrap(Box::new(|| JsValue::TRUE) as Box<dyn FnMut() -> JsValue>);
        window.set_onbeforeunload(Some(handler.as_ref().unchecked_ref()));
        *self.unload_handler.borrow_mut() = Some(handler);
    }

    fn clear_unload_confirmation(&self) {
        if let Some(window) = web_sys::window() {
            window.set_onbeforeunload(None);
        }
        self.unload_handler.borrow_mut().take();
    }
}

/// `navigator.onLine` and the window's `online`/`offline` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserConnectivity;

impl ConnectivityProvider for BrowserConnectivity {
    fn is_online(&self) -> bool {
        // Without a window there is nothing to say we are offline.
        web_sys::window().map_or(true, |w| w.navigator().on_line())
    }

    fn subscribe(&self, event: ConnectivityEvent, listener: Listener) -> Subscription {
        let Some(window) = web_sys::window() else {
            return Subscription::new(|| {});
        };
        let name = event.event_name();
        let callback = Closure::wrap(Box::new(move || listener()) as Box<dyn Fn()>);
        if let Err(e) = window.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref()) {
            warn!("Failed to register {} listener: {:?}", name, e);
        }
        Subscription::new(move || {
            if let Err(e) = window.remove_event_listener_with_callback(name, callback.as_ref().unchecked_ref()) {
                warn!("Failed to deregister {} listener: {:?}", name, e);
            }
            drop(callback);
        })
    }
}
