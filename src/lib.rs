// src/lib.rs

//! Browser-side continuation of an OpenID Connect flow for a relying party.
//!
//! Every component takes its view of the browser through the traits in
//! [`platform`], never through global state.

pub mod config;
pub mod connectivity;
pub mod error;
pub mod location;
pub mod platform;
pub mod redirect;
pub mod retry;
pub mod tabs;

/// The public prelude for the `nila-oidc-continuation` crate.
///
/// This module re-exports the most commonly used types for convenience.
pub mod prelude {
    pub use crate::config::{ClientConfig, ClientConfigBuilder};
    pub use crate::connectivity::{ConnectivityMonitor, ConnectivityState};
    pub use crate::error::ContinuationError;
    pub use crate::location::ContinuationParams;
    pub use crate::platform::{
        ConnectivityEvent, ConnectivityProvider, LocationProvider, NavigationProvider, Platform, Subscription,
    };
    pub use crate::redirect::{compose_authorization_url, AuthorizeRedirect, ErrorRedirect, OAuthDetails};
    pub use crate::retry::{IntendedDestination, RetryController};
    pub use crate::tabs::{PanelView, SelectionPanel, TabDescriptor};
}
