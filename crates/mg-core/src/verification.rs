//! Identity-verification callback signals.

use url::Url;

/// Path the verification provider redirects to when its flow ends.
const CALLBACK_PATH: &str = "/verification/callback";

/// Terminal signal from the embedded verification provider flow.
///
/// The provider's web flow is opaque to the client; the only thing consumed
/// from it is the final callback URL observed in the web view. Everything
/// before that is mid-flow navigation and is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Completed,
    Cancelled,
    Failed { reason: Option<String> },
}

impl VerificationOutcome {
    /// Parse a navigation URL observed inside the verification web view.
    ///
    /// Recognizes URLs whose path ends with `/verification/callback` and
    /// reads their `status` query parameter. Any other URL, including a
    /// malformed one, yields `None`. A callback with a status this client
    /// does not know is treated as a failure carrying the raw status, so a
    /// newer provider outcome degrades safely instead of hanging the flow.
    pub fn from_callback_url(url: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        if !parsed.path().ends_with(CALLBACK_PATH) {
            return None;
        }

        let status = parsed
            .query_pairs()
            .find(|(key, _)| key == "status")
            .map(|(_, value)| value.into_owned())?;

        match status.as_str() {
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            "failed" => {
                let reason = parsed
                    .query_pairs()
                    .find(|(key, _)| key == "reason")
                    .map(|(_, value)| value.into_owned());
                Some(Self::Failed { reason })
            }
            other => Some(Self::Failed {
                reason: Some(other.to_string()),
            }),
        }
    }
}
