// src/redirect.rs

use crate::config::ClientConfig;
use crate::error::ContinuationError;
use crate::location::{strip_delimiter, ContinuationParams, STATE_PARAM};
use crate::platform::{LocationProvider, NavigationProvider, Platform};
use base64::alphabet;
use base64::engine::general_purpose::{self, GeneralPurpose};
use base64::engine::{DecodePaddingMode, Engine};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

/// What an absent value turns into when interpolated into a navigation target.
pub const UNDEFINED_LITERAL: &str = "undefined";

/// Composes the authorization request URL from the client registration and
/// the continuation parameters.
///
/// Values are interpolated verbatim: nothing is validated or encoded, and an
/// absent parameter is written as the literal text `undefined`.
pub fn compose_authorization_url(config: &ClientConfig, params: &ContinuationParams) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&scope={}&response_type={}&state={}&id_token_hint={}",
        config.authorize_endpoint.as_str(),
        config.client_id,
        config.redirect_uri,
        config.scope,
        config.response_type,
        params.state().unwrap_or(UNDEFINED_LITERAL),
        params.id_token_hint().unwrap_or(UNDEFINED_LITERAL),
    )
}

/// The entry component: forwards the user to the authorization endpoint.
///
/// Renders nothing. Once activated it clears the confirm-before-leaving
/// interception and replaces the location with the composed URL. Activation
/// happens at most once per instance.
pub struct AuthorizeRedirect {
    target: String,
    navigation: Rc<dyn NavigationProvider>,
    fired: Cell<bool>,
}

impl AuthorizeRedirect {
    /// Reads the current location and composes the target without
    /// navigating yet.
    pub fn new(config: &ClientConfig, platform: &Platform) -> Self {
        let params = ContinuationParams::extract(platform.location.as_ref());
        Self::with_params(config, &params, Rc::clone(&platform.navigation))
    }

    /// Composes the target from already extracted parameters.
    pub fn with_params(
        config: &ClientConfig,
        params: &ContinuationParams,
        navigation: Rc<dyn NavigationProvider>,
    ) -> Self {
        Self {
            target: compose_authorization_url(config, params),
            navigation,
            fired: Cell::new(false),
        }
    }

    /// Constructs the component and runs its activation.
    pub fn mount(config: &ClientConfig, platform: &Platform) -> Self {
        let redirect = Self::new(config, platform);
        redirect.activate();
        redirect
    }

    /// Performs the redirect. Returns `false` without navigating if this
    /// instance has already redirected.
    #[instrument(skip(self))]
    pub fn activate(&self) -> bool {
        if self.fired.replace(true) {
            warn!("Authorization redirect already dispatched; ignoring repeated activation.");
            return false;
        }
        info!("Redirecting to the authorization endpoint.");
        self.navigation.clear_unload_confirmation();
        self.navigation.replace(&self.target);
        true
    }

    /// Whether the redirect has been dispatched.
    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    /// The composed authorization request URL.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// What an absent `state` becomes in an error redirect query.
pub const NULL_LITERAL: &str = "null";

// `atob` accepts standard base64 with or without padding.
const FRAGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    general_purpose::PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The authorization details the server hands the UI in the location
/// fragment, as base64-encoded JSON.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthDetails {
    #[serde(default)]
    pub redirect_uri: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl OAuthDetails {
    /// Decodes the details from a raw fragment (`#` followed by base64 JSON).
    ///
    /// # Errors
    ///
    /// `Base64DecodeError` if the fragment is not base64, `InvalidOAuthDetails`
    /// if the decoded bytes are not a JSON details object.
    pub fn from_fragment(raw_fragment: &str) -> Result<Self, ContinuationError> {
        let bytes = FRAGMENT_ENGINE.decode(strip_delimiter(raw_fragment))?;
        serde_json::from_slice(&bytes).map_err(|e| ContinuationError::InvalidOAuthDetails(e.to_string()))
    }
}

#[derive(Serialize)]
struct ErrorRedirectQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    error_description: Option<&'a str>,
    state: &'a str,
    error: &'a str,
}

/// Composes `<redirect_uri>?error_description=..&state=..&error=..`.
///
/// Returns `None` when `redirect_uri` is empty, since there is nowhere to
/// send the error. An empty description is left out and an absent `state`
/// is written as `null`.
pub fn compose_error_redirect(
    redirect_uri: &str,
    state: Option<&str>,
    error_code: &str,
    error_description: Option<&str>,
) -> Result<Option<String>, ContinuationError> {
    if redirect_uri.is_empty() {
        return Ok(None);
    }
    let query = serde_urlencoded::to_string(ErrorRedirectQuery {
        error_description: error_description.filter(|d| !d.is_empty()),
        state: state.unwrap_or(NULL_LITERAL),
        error: error_code,
    })?;
    Ok(Some(format!("{redirect_uri}?{query}")))
}

/// Sends an error back to the redirect URI named in the fragment's OAuth
/// details.
pub struct ErrorRedirect {
    state: Option<String>,
    raw_fragment: String,
    navigation: Rc<dyn NavigationProvider>,
}

impl ErrorRedirect {
    /// Captures `state` and the fragment of the current location.
    pub fn new(location: &dyn LocationProvider, navigation: Rc<dyn NavigationProvider>) -> Self {
        Self {
            state: location.query_param(STATE_PARAM),
            raw_fragment: location.raw_fragment(),
            navigation,
        }
    }

    pub fn mount(platform: &Platform) -> Self {
        Self::new(platform.location.as_ref(), Rc::clone(&platform.navigation))
    }

    /// Clears the confirm-before-leaving interception and replaces the
    /// location with the error redirect. Returns `Ok(false)` if the OAuth
    /// details carry no redirect URI.
    ///
    /// # Errors
    ///
    /// The fragment could not be decoded into OAuth details. Nothing is
    /// navigated in that case.
    #[instrument(skip(self), err)]
    pub fn redirect(&self, error_code: &str, error_description: Option<&str>) -> Result<bool, ContinuationError> {
        let details = OAuthDetails::from_fragment(&self.raw_fragment)?;
        let Some(target) = compose_error_redirect(
            details.redirect_uri.as_deref().unwrap_or_default(),
            self.state.as_deref(),
            error_code,
            error_description,
        )?
        else {
            debug!("No redirect URI in the OAuth details; error stays on this page.");
            return Ok(false);
        };

        self.navigation.clear_unload_confirmation();
        self.navigation.replace(&target);
        Ok(true)
    }
}
