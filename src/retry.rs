// src/retry.rs

use crate::platform::{LocationProvider, NavigationProvider, Platform};
use crate::redirect::UNDEFINED_LITERAL;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{debug, info, instrument};

/// Translation keys for the failure page's static text.
pub const HEADER_KEY: &str = "errors.network_error.header";
pub const SUB_HEADER_KEY: &str = "errors.network_error.subHeader";
pub const RETRY_BUTTON_KEY: &str = "errors.network_error.button";

/// Where the user was going when the navigation failed.
///
/// Travels in the navigation state bag of a client-side transition, so it
/// does not survive a full page reload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntendedDestination {
    pub path: String,
}

impl IntendedDestination {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Reads a destination out of a navigation state bag. Anything without a
    /// string `path` yields `None`.
    pub fn from_state(state: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(state.clone()).ok()
    }

    /// The state bag to attach when navigating to the failure page.
    pub fn to_state(&self) -> serde_json::Value {
        serde_json::json!({ "path": self.path })
    }
}

/// The failure page's retry action.
///
/// Reads the intended destination once when mounted and replays it each
/// time the user asks. Connectivity is not consulted; if the platform is
/// still offline the navigation itself fails.
pub struct RetryController {
    destination: Option<IntendedDestination>,
    navigation: Rc<dyn NavigationProvider>,
}

impl RetryController {
    pub fn mount(platform: &Platform) -> Self {
        Self::from_location(platform.location.as_ref(), Rc::clone(&platform.navigation))
    }

    pub fn from_location(location: &dyn LocationProvider, navigation: Rc<dyn NavigationProvider>) -> Self {
        let destination = location
            .navigation_state()
            .as_ref()
            .and_then(IntendedDestination::from_state);
        debug!(destination = ?destination, "Retry controller mounted.");
        Self { destination, navigation }
    }

    pub fn destination(&self) -> Option<&IntendedDestination> {
        self.destination.as_ref()
    }

    /// The navigation target a retry uses. Without a recorded destination
    /// this is the literal `undefined`, exactly what the browser receives
    /// when handed an undefined target.
    pub fn target(&self) -> &str {
        self.destination
            .as_ref()
            .map_or(UNDEFINED_LITERAL, |destination| destination.path.as_str())
    }

    /// User-triggered: clears the confirm-before-leaving interception and
    /// replaces the location with the recorded destination.
    #[instrument(skip(self))]
    pub fn retry(&self) {
        let target = self.target();
        info!(destination = target, "Retrying navigation.");
        self.navigation.clear_unload_confirmation();
        self.navigation.replace(target);
    }
}
