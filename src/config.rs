// src/config.rs

use crate::error::ContinuationError;
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// The scope requested when none is configured.
pub const DEFAULT_SCOPE: &str = "openid";
/// The response type requested when none is configured.
pub const DEFAULT_RESPONSE_TYPE: &str = "code";

/// The static client registration used to compose authorization requests.
///
/// This struct should be constructed using the `ClientConfigBuilder`, or
/// loaded from YAML with [`ClientConfig::from_yaml_str`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// The authorization endpoint of the OIDC provider, e.g.
    /// `https://idp.example.com/authorize`.
    pub authorize_endpoint: Url,
    /// The client ID of the application, as registered with the OIDC provider.
    pub client_id: String,
    /// The redirect URI registered for this client. Interpolated into the
    /// authorization request as-is.
    pub redirect_uri: String,
    /// The requested scope. Defaults to `openid`.
    pub scope: String,
    /// The requested response type. Defaults to `code`.
    pub response_type: String,
}

/// The on-disk shape of a `ClientConfig`. Every field is optional here so
/// that missing fields are reported the same way the builder reports them.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClientConfig {
    authorize_endpoint: Option<String>,
    client_id: Option<String>,
    redirect_uri: Option<String>,
    scope: Option<String>,
    response_type: Option<String>,
}

impl ClientConfig {
    /// Parses a YAML document into a `ClientConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` for malformed YAML and the builder's errors for
    /// missing or invalid fields.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ContinuationError> {
        let raw: RawClientConfig = serde_yaml::from_str(yaml)?;

        let mut builder = ClientConfigBuilder::new();
        if let Some(endpoint) = raw.authorize_endpoint {
            builder = builder.authorize_endpoint(&endpoint)?;
        }
        if let Some(client_id) = raw.client_id {
            builder = builder.client_id(client_id);
        }
        if let Some(redirect_uri) = raw.redirect_uri {
            builder = builder.redirect_uri(redirect_uri);
        }
        if let Some(scope) = raw.scope {
            builder = builder.scope(scope);
        }
        if let Some(response_type) = raw.response_type {
            builder = builder.response_type(response_type);
        }
        builder.build()
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ContinuationError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

/// A builder for creating a `ClientConfig` instance.
#[derive(Default)]
pub struct ClientConfigBuilder {
    authorize_endpoint: Option<Url>,
    client_id: Option<String>,
    redirect_uri: Option<String>,
    scope: Option<String>,
    response_type: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new `ClientConfigBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the authorization endpoint. This is a required field.
    ///
    /// # Arguments
    ///
    /// * `url` - The endpoint URL, e.g. "https://idp.example.com/authorize".
    pub fn authorize_endpoint(mut self, url: &str) -> Result<Self, ContinuationError> {
        let parsed_url = Url::parse(url).map_err(|e| ContinuationError::InvalidUrl(e.to_string()))?;
        self.authorize_endpoint = Some(parsed_url);
        Ok(self)
    }

    /// Sets the client ID of the application. This is a required field.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the registered redirect URI. This is a required field.
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Sets the requested scope.
    /// Defaults to `openid` if not set.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Sets the requested response type.
    /// Defaults to `code` if not set.
    pub fn response_type(mut self, response_type: impl Into<String>) -> Self {
        self.response_type = Some(response_type.into());
        self
    }

    /// Consumes the builder and returns a `ClientConfig` object.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field (`authorize_endpoint`,
    /// `client_id`, `redirect_uri`) is missing, or if `client_id` is blank.
    pub fn build(self) -> Result<ClientConfig, ContinuationError> {
        let authorize_endpoint = self
            .authorize_endpoint
            .ok_or(ContinuationError::MissingConfiguration("authorize_endpoint".to_string()))?;
        let client_id = self
            .client_id
            .ok_or(ContinuationError::MissingConfiguration("client_id".to_string()))?;
        let redirect_uri = self
            .redirect_uri
            .ok_or(ContinuationError::MissingConfiguration("redirect_uri".to_string()))?;

        if client_id.trim().is_empty() {
            return Err(ContinuationError::InvalidConfiguration(
                "client_id must not be empty".to_string(),
            ));
        }

        Ok(ClientConfig {
            authorize_endpoint,
            client_id,
            redirect_uri,
            scope: self.scope.unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            response_type: self
                .response_type
                .unwrap_or_else(|| DEFAULT_RESPONSE_TYPE.to_string()),
        })
    }
}
