#![allow(dead_code)]

use nila_oidc_continuation::platform::memory::{ManualConnectivity, MemoryLocation, RecordingNavigator};
use nila_oidc_continuation::prelude::*;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Routes library logs to the test harness. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn test_client_config() -> ClientConfig {
    ClientConfigBuilder::new()
        .authorize_endpoint("https://idp.example.com/authorize")
        .unwrap()
        .client_id("rp-client")
        .redirect_uri("https://rp.example.com/callback")
        .build()
        .expect("test config should build")
}

/// A platform made of the in-memory doubles, with handles kept for inspection.
pub struct TestPlatform {
    pub platform: Platform,
    pub navigator: Rc<RecordingNavigator>,
    pub connectivity: Rc<ManualConnectivity>,
}

pub fn test_platform(location: MemoryLocation, online: bool) -> TestPlatform {
    init_tracing();
    let navigator = Rc::new(RecordingNavigator::new());
    let connectivity = Rc::new(ManualConnectivity::new(online));
    let platform = Platform::new(
        Rc::new(location),
        navigator.clone(),
        connectivity.clone(),
    );
    TestPlatform {
        platform,
        navigator,
        connectivity,
    }
}

pub fn at(url: &str) -> MemoryLocation {
    MemoryLocation::parse(url).expect("test URL should parse")
}
