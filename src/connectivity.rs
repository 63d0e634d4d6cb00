// src/connectivity.rs

use crate::platform::{ConnectivityEvent, ConnectivityProvider, Subscription};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info};

type Watcher = Rc<dyn Fn(bool)>;

/// A read handle on the monitored connectivity value.
///
/// Only the monitor's own listeners write to it. Handles stay readable after
/// the monitor is gone but stop changing.
#[derive(Clone, Debug)]
pub struct ConnectivityState {
    online: Rc<Cell<bool>>,
}

impl ConnectivityState {
    pub fn is_online(&self) -> bool {
        self.online.get()
    }
}

/// Tracks the platform's online/offline status for as long as it is mounted.
///
/// Mounting reads the current status and registers one listener for each
/// connectivity event. Both listeners are released when the monitor is
/// unmounted or dropped.
pub struct ConnectivityMonitor {
    state: ConnectivityState,
    watchers: Rc<RefCell<Vec<Watcher>>>,
    subscriptions: Vec<Subscription>,
}

impl ConnectivityMonitor {
    pub fn mount(provider: Rc<dyn ConnectivityProvider>) -> Self {
        let state = ConnectivityState {
            online: Rc::new(Cell::new(provider.is_online())),
        };
        let watchers: Rc<RefCell<Vec<Watcher>>> = Rc::new(RefCell::new(Vec::new()));

        let subscriptions = [ConnectivityEvent::Online, ConnectivityEvent::Offline]
            .into_iter()
            .map(|event| {
                let listener = republisher(event, Rc::clone(&provider), state.clone(), Rc::clone(&watchers));
                provider.subscribe(event, listener)
            })
            .collect();

        debug!(online = state.is_online(), "Connectivity monitor mounted.");
        Self {
            state,
            watchers,
            subscriptions,
        }
    }

    /// The current monitored value.
    pub fn is_online(&self) -> bool {
        self.state.is_online()
    }

    /// A handle for reading the monitored value elsewhere.
    pub fn state(&self) -> ConnectivityState {
        self.state.clone()
    }

    /// Calls `watcher` with the republished value after every connectivity event.
    pub fn watch(&self, watcher: impl Fn(bool) + 'static) {
        self.watchers.borrow_mut().push(Rc::new(watcher));
    }

    /// Releases both platform listeners.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        debug!("Connectivity monitor unmounted; releasing listeners.");
        self.subscriptions.clear();
    }
}

/// Builds the listener for `event`. It re-reads the platform status rather
/// than assuming the event's polarity.
///
/// The listener owns a strong handle on `provider`: callers may hand over
/// their only handle. Dropping the subscription releases it.
fn republisher(
    event: ConnectivityEvent,
    provider: Rc<dyn ConnectivityProvider>,
    state: ConnectivityState,
    watchers: Rc<RefCell<Vec<Watcher>>>,
) -> Rc<dyn Fn()> {
    Rc::new(move || {
        let online = provider.is_online();
        state.online.set(online);
        info!(%event, online, "Connectivity changed.");

        let current: Vec<Watcher> = watchers.borrow().iter().cloned().collect();
        for watcher in current {
            watcher(online);
        }
    })
}
