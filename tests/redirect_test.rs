mod common;

use common::{at, test_client_config, test_platform};
use nila_oidc_continuation::platform::memory::NavigationCall;
use nila_oidc_continuation::prelude::*;
use nila_oidc_continuation::redirect::compose_error_redirect;
use base64::engine::{general_purpose::STANDARD, Engine};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::rc::Rc;

#[test]
fn test_extracts_state_and_fragment_hint() {
    let location = at("https://rp.example.com/continue?state=abc&ui_locales=en#eyJhbGciOi.payload.sig");

    let params = ContinuationParams::extract(&location);

    assert_eq!(params.state(), Some("abc"));
    assert_eq!(params.id_token_hint(), Some("eyJhbGciOi.payload.sig"));
}

#[test]
fn test_state_is_query_decoded_but_fragment_is_not() {
    let location = at("https://rp.example.com/continue?state=a%20b+c#hint%2Fwith%2Fescapes");

    let params = ContinuationParams::extract(&location);

    assert_eq!(params.state(), Some("a b c"));
    assert_eq!(params.id_token_hint(), Some("hint%2Fwith%2Fescapes"));
}

#[test]
fn test_missing_parameters_are_absent_or_empty() {
    let params = ContinuationParams::extract(&at("https://rp.example.com/continue"));

    assert_eq!(params.state(), None);
    assert_eq!(params.id_token_hint(), Some(""), "An empty fragment yields an empty hint");
}

#[test]
fn test_composes_authorization_url() {
    let config = test_client_config();
    let params = ContinuationParams::new(Some("abc".to_string()), Some("def".to_string()));

    let url = compose_authorization_url(&config, &params);

    assert_eq!(
        url,
        "https://idp.example.com/authorize?client_id=rp-client&redirect_uri=https://rp.example.com/callback\
         &scope=openid&response_type=code&state=abc&id_token_hint=def"
    );
    assert!(url.contains("state=abc&id_token_hint=def"));
}

#[test]
fn test_absent_parameters_are_interpolated_literally() {
    let config = test_client_config();

    let url = compose_authorization_url(&config, &ContinuationParams::default());

    assert!(
        url.ends_with("&state=undefined&id_token_hint=undefined"),
        "Missing values must not be dropped from the URL: {url}"
    );
}

#[test]
fn test_mount_clears_interception_then_navigates_once() {
    let env = test_platform(at("https://rp.example.com/continue?state=abc#def"), true);
    env.platform.start();

    let redirect = AuthorizeRedirect::mount(&test_client_config(), &env.platform);

    assert!(redirect.has_fired());
    assert!(!env.navigator.unload_confirmation_installed());
    assert_eq!(
        env.navigator.calls(),
        vec![
            NavigationCall::InstallUnloadConfirmation,
            NavigationCall::ClearUnloadConfirmation,
            NavigationCall::Replace(redirect.target().to_string()),
        ]
    );
    assert!(redirect.target().contains("state=abc&id_token_hint=def"));
}

#[test]
fn test_repeated_activation_does_not_navigate_twice() {
    let env = test_platform(at("https://rp.example.com/continue?state=abc#def"), true);

    let redirect = AuthorizeRedirect::mount(&test_client_config(), &env.platform);
    assert!(!redirect.activate(), "Second activation must be ignored");

    assert_eq!(env.navigator.replacements().len(), 1);
}

#[test]
fn test_new_does_not_navigate_until_activated() {
    let env = test_platform(at("https://rp.example.com/continue?state=abc#def"), true);

    let redirect = AuthorizeRedirect::new(&test_client_config(), &env.platform);
    assert!(env.navigator.calls().is_empty());

    assert!(redirect.activate());
    assert_eq!(env.navigator.replacements(), vec![redirect.target().to_string()]);
}

#[test]
fn test_error_redirect_query_layout() {
    let url = compose_error_redirect(
        "https://rp.example.com/callback",
        Some("abc"),
        "access_denied",
        Some("User cancelled"),
    )
    .unwrap();

    assert_eq!(
        url.as_deref(),
        Some("https://rp.example.com/callback?error_description=User+cancelled&state=abc&error=access_denied")
    );
}

/// Builds `#<base64 JSON>` the way the authorization server hands OAuth
/// details to the UI.
fn oauth_fragment(details: serde_json::Value) -> String {
    format!("#{}", STANDARD.encode(details.to_string()))
}

#[test]
fn test_error_redirect_omits_empty_description_and_writes_null_state() {
    let url = compose_error_redirect("https://rp.example.com/callback", None, "invalid_request", Some("")).unwrap();

    assert_eq!(
        url.as_deref(),
        Some("https://rp.example.com/callback?state=null&error=invalid_request")
    );
}

#[test]
fn test_oauth_details_decode_from_fragment() {
    let fragment = oauth_fragment(json!({
        "transactionId": "txn-1",
        "redirectUri": "https://rp.example.com/callback",
        "configs": {}
    }));

    let details = OAuthDetails::from_fragment(&fragment).unwrap();

    assert_eq!(details.redirect_uri.as_deref(), Some("https://rp.example.com/callback"));
    assert_eq!(details.transaction_id.as_deref(), Some("txn-1"));
}

#[test]
fn test_oauth_details_accept_unpadded_base64() {
    let payload = STANDARD.encode(r#"{"redirectUri":"https://rp.example.com/cb"}"#);
    let fragment = format!("#{}", payload.trim_end_matches('='));

    let details = OAuthDetails::from_fragment(&fragment).unwrap();

    assert_eq!(details.redirect_uri.as_deref(), Some("https://rp.example.com/cb"));
}

#[test]
fn test_error_redirect_uses_redirect_uri_from_fragment() {
    let fragment = oauth_fragment(json!({ "redirectUri": "https://other-rp.example.com/landing" }));
    let env = test_platform(at(&format!("https://rp.example.com/error?state=xyz{fragment}")), true);
    env.platform.start();

    let error_redirect = ErrorRedirect::mount(&env.platform);
    assert!(error_redirect.redirect("server_error", Some("boom")).unwrap());

    assert!(!env.navigator.unload_confirmation_installed());
    assert_eq!(
        env.navigator.replacements(),
        vec!["https://other-rp.example.com/landing?error_description=boom&state=xyz&error=server_error".to_string()]
    );
}

#[test]
fn test_error_redirect_without_state_sends_null() {
    let fragment = oauth_fragment(json!({ "redirectUri": "https://rp.example.com/callback" }));
    let env = test_platform(at(&format!("https://rp.example.com/error{fragment}")), true);

    let error_redirect = ErrorRedirect::new(env.platform.location.as_ref(), Rc::clone(&env.platform.navigation));
    assert!(error_redirect.redirect("access_denied", None).unwrap());

    assert_eq!(
        env.navigator.replacements(),
        vec!["https://rp.example.com/callback?state=null&error=access_denied".to_string()]
    );
}

#[test]
fn test_error_redirect_without_redirect_uri_stays_put() {
    let fragment = oauth_fragment(json!({ "transactionId": "txn-1" }));
    let env = test_platform(at(&format!("https://rp.example.com/error?state=abc{fragment}")), true);

    let navigated = ErrorRedirect::mount(&env.platform).redirect("server_error", None).unwrap();

    assert!(!navigated);
    assert!(env.navigator.calls().is_empty());
}

#[test]
fn test_error_redirect_with_undecodable_fragment_does_not_navigate() {
    let env = test_platform(at("https://rp.example.com/error?state=abc#not*base64"), true);
    let result = ErrorRedirect::mount(&env.platform).redirect("server_error", None);
    assert!(matches!(result, Err(ContinuationError::Base64DecodeError(_))));

    let env = test_platform(at(&format!("https://rp.example.com/error?state=abc#{}", STANDARD.encode("plain text"))), true);
    let result = ErrorRedirect::mount(&env.platform).redirect("server_error", None);
    assert!(matches!(result, Err(ContinuationError::InvalidOAuthDetails(_))));

    assert!(env.navigator.calls().is_empty());
}
