//! Walks through a continuation flow against the in-memory platform.
//!
//! Run with `RUST_LOG=debug cargo run --example redirect_flow [config.yaml]`.

use nila_oidc_continuation::platform::memory::{ManualConnectivity, MemoryLocation, RecordingNavigator};
use nila_oidc_continuation::prelude::*;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Panel {
    Otp,
    Wallet,
}

fn main() -> Result<(), ContinuationError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/demos/client.yaml").to_string());
    let config = ClientConfig::from_yaml_file(&config_path)?;

    let navigator = Rc::new(RecordingNavigator::new());
    let connectivity = Rc::new(ManualConnectivity::new(true));
    let location = MemoryLocation::parse("https://rp.example.com/continue?state=ptOO76SD#eyJhbGciOiJSUzI1NiJ9.e30.sig")?
        .with_navigation_state(IntendedDestination::new("/authorize").to_state());
    let platform = Platform::new(Rc::new(location), navigator.clone(), connectivity.clone());
    platform.start();

    // Entry page.
    let redirect = AuthorizeRedirect::mount(&config, &platform);
    info!("Authorization request: {}", redirect.target());

    // Any page can branch on connectivity.
    let monitor = ConnectivityMonitor::mount(platform.connectivity.clone());
    monitor.watch(|online| info!(online, "Rendering for new connectivity."));
    connectivity.go_offline();
    connectivity.go_online();

    // Failure page.
    let retry = RetryController::mount(&platform);
    retry.retry();

    // Login options.
    let tabs = vec![
        TabDescriptor::new("otp", "key", Panel::Otp),
        TabDescriptor::new("wallet", "qrcode", Panel::Wallet),
    ];
    let block = BTreeMap::from([(Panel::Otp, "Enter OTP"), (Panel::Wallet, "Scan the QR code")]);
    let mut panel = SelectionPanel::new(tabs, block)?;
    panel.select(1)?;
    info!("Tab markup: {}", panel.render().to_html());

    monitor.unmount();
    info!("Navigation log: {:?}", navigator.calls());
    Ok(())
}
