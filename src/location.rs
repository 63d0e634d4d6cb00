// src/location.rs

use crate::platform::LocationProvider;
use std::fmt;
use tracing::{debug, instrument};

/// The query parameter carrying the flow's `state`.
pub const STATE_PARAM: &str = "state";

/// Values carried across the redirect boundary that are needed to resume the
/// flow. Read once from the current location and never modified.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ContinuationParams {
    state: Option<String>,
    id_token_hint: Option<String>,
}

impl ContinuationParams {
    pub fn new(state: Option<String>, id_token_hint: Option<String>) -> Self {
        Self { state, id_token_hint }
    }

    /// Reads the continuation parameters from `location`.
    ///
    /// `state` is the decoded `state` query parameter. The id-token hint is
    /// the raw fragment with its leading delimiter removed and no further
    /// decoding; an empty fragment yields an empty hint.
    #[instrument(skip_all)]
    pub fn extract(location: &dyn LocationProvider) -> Self {
        let state = location.query_param(STATE_PARAM);
        let fragment = location.raw_fragment();
        let id_token_hint = strip_delimiter(&fragment).to_string();

        debug!(
            state_present = state.is_some(),
            id_token_hint_len = id_token_hint.len(),
            "Extracted continuation parameters."
        );
        Self {
            state,
            id_token_hint: Some(id_token_hint),
        }
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn id_token_hint(&self) -> Option<&str> {
        self.id_token_hint.as_deref()
    }
}

/// Drops the first character, whatever it is.
pub(crate) fn strip_delimiter(fragment: &str) -> &str {
    let mut chars = fragment.chars();
    chars.next();
    chars.as_str()
}

// The hint is a credential; keep it out of logs.
impl fmt::Debug for ContinuationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuationParams")
            .field("state", &self.state)
            .field(
                "id_token_hint",
                &self.id_token_hint.as_ref().map(|hint| format!("<{} bytes>", hint.len())),
            )
            .finish()
    }
}
