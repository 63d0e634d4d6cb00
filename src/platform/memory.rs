// src/platform/memory.rs

//! In-memory platform providers with fully deterministic behaviour.

use super::{ConnectivityEvent, ConnectivityProvider, Listener, LocationProvider, NavigationProvider, Subscription};
use crate::error::ContinuationError;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use url::Url;

/// A fixed location backed by a parsed URL.
#[derive(Clone, Debug)]
pub struct MemoryLocation {
    url: Url,
    state: Option<serde_json::Value>,
}

impl MemoryLocation {
    pub fn new(url: Url) -> Self {
        Self { url, state: None }
    }

    /// Parses `url` into a location.
    pub fn parse(url: &str) -> Result<Self, ContinuationError> {
        let url = Url::parse(url).map_err(|e| ContinuationError::InvalidUrl(e.to_string()))?;
        Ok(Self::new(url))
    }

    /// Attaches a navigation state bag to the location.
    pub fn with_navigation_state(mut self, state: serde_json::Value) -> Self {
        self.state = Some(state);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl LocationProvider for MemoryLocation {
    fn query_param(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.into_owned())
    }

    fn raw_fragment(&self) -> String {
        match self.url.fragment() {
            Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
            _ => String::new(),
        }
    }

    fn navigation_state(&self) -> Option<serde_json::Value> {
        self.state.clone()
    }
}

/// One call made against a [`RecordingNavigator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationCall {
    InstallUnloadConfirmation,
    ClearUnloadConfirmation,
    Replace(String),
}

/// Records navigation requests instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    calls: RefCell<Vec<NavigationCall>>,
    unload_confirmation: Cell<bool>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call, in order.
    pub fn calls(&self) -> Vec<NavigationCall> {
        self.calls.borrow().clone()
    }

    /// The targets passed to `replace`, in order.
    pub fn replacements(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                NavigationCall::Replace(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether a confirm-before-leaving interception is currently set.
    pub fn unload_confirmation_installed(&self) -> bool {
        self.unload_confirmation.get()
    }
}

impl NavigationProvider for RecordingNavigator {
    fn replace(&self, url: &str) {
        self.calls.borrow_mut().push(NavigationCall::Replace(url.to_string()));
    }

    fn install_unload_confirmation(&self) {
        self.unload_confirmation.set(true);
        self.calls.borrow_mut().push(NavigationCall::InstallUnloadConfirmation);
    }

    fn clear_unload_confirmation(&self) {
        self.unload_confirmation.set(false);
        self.calls.borrow_mut().push(NavigationCall::ClearUnloadConfirmation);
    }
}

type ListenerTable = RefCell<Vec<(u64, ConnectivityEvent, Listener)>>;

/// Connectivity whose status and events are driven by the caller.
pub struct ManualConnectivity {
    online: Cell<bool>,
    next_id: Cell<u64>,
    listeners: Rc<ListenerTable>,
}

impl ManualConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: Cell::new(online),
            next_id: Cell::new(0),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Reports offline and fires the `offline` event.
    pub fn go_offline(&self) {
        self.online.set(false);
        self.emit(ConnectivityEvent::Offline);
    }

    /// Reports online and fires the `online` event.
    pub fn go_online(&self) {
        self.online.set(true);
        self.emit(ConnectivityEvent::Online);
    }

    /// Changes the reported status without firing any event.
    pub fn set_reported_status(&self, online: bool) {
        self.online.set(online);
    }

    /// Fires `event` without touching the reported status.
    pub fn emit(&self, event: ConnectivityEvent) {
        // Snapshot first: a listener may subscribe or unsubscribe while running.
        let targets: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, registered, _)| *registered == event)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();
        for listener in targets {
            listener();
        }
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ConnectivityProvider for ManualConnectivity {
    fn is_online(&self) -> bool {
        self.online.get()
    }

    fn subscribe(&self, event: ConnectivityEvent, listener: Listener) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, event, listener));

        let table: Weak<ListenerTable> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(table) = table.upgrade() {
                table.borrow_mut().retain(|(registered, _, _)| *registered != id);
            }
        })
    }
}
