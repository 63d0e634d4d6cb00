// src/platform/mod.rs

//! Injected access to the browser environment.
//!
//! Components never reach for global `window`/`location`/`navigator` state.
//! They receive these providers instead, so tests can substitute the
//! deterministic doubles in [`memory`] and a browser build can use the
//! `web` feature's implementations.

pub mod memory;
#[cfg(feature = "web")]
pub mod web;

use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// A callback invoked by a [`ConnectivityProvider`] when its event fires.
pub type Listener = Rc<dyn Fn()>;

/// Read access to the current navigable location.
pub trait LocationProvider {
    /// Looks up a query-string parameter, applying standard query decoding.
    /// Returns the first value when the key repeats.
    fn query_param(&self, key: &str) -> Option<String>;

    /// The raw fragment text: either empty or starting with `#`.
    fn raw_fragment(&self) -> String;

    /// The state bag attached to the navigation that produced this location,
    /// if any. Only survives client-side transitions.
    fn navigation_state(&self) -> Option<serde_json::Value>;
}

/// Outbound navigation primitives.
pub trait NavigationProvider {
    /// Replaces the current document location with `url`. Fire-and-forget:
    /// failures surface as platform navigation failures.
    fn replace(&self, url: &str);

    /// Registers a "confirm before leaving" interception.
    fn install_unload_confirmation(&self);

    /// Clears any "confirm before leaving" interception.
    fn clear_unload_confirmation(&self);
}

/// The two platform connectivity signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectivityEvent {
    Online,
    Offline,
}

impl ConnectivityEvent {
    /// The platform event name.
    pub fn event_name(self) -> &'static str {
        match self {
            ConnectivityEvent::Online => "online",
            ConnectivityEvent::Offline => "offline",
        }
    }
}

impl fmt::Display for ConnectivityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// The platform's online/offline status and its change events.
pub trait ConnectivityProvider {
    /// The platform's currently reported status.
    fn is_online(&self) -> bool;

    /// Registers `listener` for `event`. The listener stays registered until
    /// the returned [`Subscription`] is disposed or dropped.
    fn subscribe(&self, event: ConnectivityEvent, listener: Listener) -> Subscription;
}

/// A registered listener. Dropping it deregisters the listener.
#[must_use = "dropping a Subscription immediately deregisters its listener"]
pub struct Subscription {
    disposer: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wraps the deregistration step of a listener.
    pub fn new(disposer: impl FnOnce() + 'static) -> Self {
        Self {
            disposer: Some(Box::new(disposer)),
        }
    }

    /// Deregisters the listener now.
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.disposer.is_some())
            .finish()
    }
}

/// The three providers a page is built from.
#[derive(Clone)]
pub struct Platform {
    pub location: Rc<dyn LocationProvider>,
    pub navigation: Rc<dyn NavigationProvider>,
    pub connectivity: Rc<dyn ConnectivityProvider>,
}

impl Platform {
    pub fn new(
        location: Rc<dyn LocationProvider>,
        navigation: Rc<dyn NavigationProvider>,
        connectivity: Rc<dyn ConnectivityProvider>,
    ) -> Self {
        Self {
            location,
            navigation,
            connectivity,
        }
    }

    /// Application start-up: ask the user to confirm before leaving the
    /// flow. Redirect and retry clear this again before they navigate.
    pub fn start(&self) {
        debug!("Installing confirm-before-leaving interception.");
        self.navigation.install_unload_confirmation();
    }
}
