//! Error types for citation fetch operations.
//!
//! Every failure a fetch call can produce maps to exactly one variant of
//! [`FetchError`]; the free-text catch-all exists only as the deliberate
//! [`FetchError::Unknown`] escape hatch. All kinds are terminal for the call
//! that produced them - nothing is retried.

use thiserror::Error;

/// Errors that can occur while fetching citation metadata.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Underlying transport could not establish a connection.
    #[error("connection error calling {url}: {source}")]
    Connectivity {
        /// The request URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the fixed timeout bound.
    #[error("request timed out calling {url}")]
    Timeout {
        /// The request URL that timed out.
        url: String,
    },

    /// Response received but the status code indicates failure.
    #[error("HTTP {status} from {url}: {detail}")]
    HttpStatus {
        /// The request URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// Service-provided detail: reason phrase, or the response body
        /// when the service returns structured error bodies.
        detail: String,
    },

    /// Required translator configuration value(s) absent.
    ///
    /// Raised before any network call is attempted.
    #[error("missing configuration: {missing}\n  Suggestion: {suggestion}")]
    MissingConfig {
        /// The missing value(s), by name.
        missing: String,
        /// How to provide them.
        suggestion: &'static str,
    },

    /// Response body could not be parsed as JSON when JSON was expected.
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        /// The request URL whose body failed to parse.
        url: String,
        /// The underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Any other failure; the message is preserved verbatim for diagnostics.
    #[error("unexpected error: {message}")]
    Unknown {
        /// The underlying failure message.
        message: String,
    },
}

impl FetchError {
    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
            detail: detail.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a missing-configuration error naming the absent values.
    #[must_use]
    pub fn missing_config(missing: &[&str]) -> Self {
        Self::MissingConfig {
            missing: missing.join(", "),
            suggestion: "set the listed value(s) in the secrets file or environment",
        }
    }

    /// Creates a JSON decode error.
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Creates an unknown error with the message preserved verbatim.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Classifies a transport-level error from the HTTP client.
    ///
    /// Timeouts are checked before connection failures so that an elapsed
    /// deadline during connect still reports as [`FetchError::Timeout`];
    /// anything that is neither falls through to [`FetchError::Unknown`].
    pub fn from_transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else if source.is_connect() {
            Self::Connectivity { url, source }
        } else {
            Self::Unknown {
                message: source.to_string(),
            }
        }
    }

    /// Returns the error kind label for this error.
    #[must_use]
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Connectivity { .. } => FetchErrorKind::Connectivity,
            Self::Timeout { .. } => FetchErrorKind::Timeout,
            Self::HttpStatus { .. } => FetchErrorKind::HttpStatus,
            Self::MissingConfig { .. } => FetchErrorKind::MissingConfig,
            Self::Decode { .. } => FetchErrorKind::Decode,
            Self::Unknown { .. } => FetchErrorKind::Unknown,
        }
    }

    /// Returns the HTTP status code when this error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` because the
// variants require the request URL for context, and classification between
// Timeout/Connectivity/Unknown depends on inspecting the source error.
// `from_transport()` is the single conversion point.

/// Kind labels for the error taxonomy, used in envelopes and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Connectivity,
    Timeout,
    HttpStatus,
    MissingConfig,
    Decode,
    Unknown,
}

impl FetchErrorKind {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::Timeout => "timeout",
            Self::HttpStatus => "http_status",
            Self::MissingConfig => "missing_config",
            Self::Decode => "decode",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn decode_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("not json").unwrap_err()
    }

    #[test]
    fn test_http_status_display() {
        let error = FetchError::http_status("https://example.com/api", 404, "Not Found");
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(msg.contains("Not Found"), "Expected detail in: {msg}");
        assert!(
            msg.contains("https://example.com/api"),
            "Expected URL in: {msg}"
        );
    }

    #[test]
    fn test_timeout_display() {
        let error = FetchError::timeout("https://example.com/api");
        let msg = error.to_string();
        assert!(msg.contains("timed out"), "Expected 'timed out' in: {msg}");
        assert!(
            msg.contains("https://example.com/api"),
            "Expected URL in: {msg}"
        );
    }

    #[test]
    fn test_missing_config_display_names_values() {
        let error = FetchError::missing_config(&["translator base URL", "translator API key"]);
        let msg = error.to_string();
        assert!(
            msg.contains("translator base URL"),
            "Expected first value in: {msg}"
        );
        assert!(
            msg.contains("translator API key"),
            "Expected second value in: {msg}"
        );
        assert!(
            msg.contains("Suggestion:"),
            "Expected actionable suggestion in: {msg}"
        );
    }

    #[test]
    fn test_decode_display() {
        let error = FetchError::decode("https://example.com/api", decode_error());
        let msg = error.to_string();
        assert!(
            msg.contains("invalid JSON"),
            "Expected 'invalid JSON' in: {msg}"
        );
    }

    #[test]
    fn test_unknown_preserves_message_verbatim() {
        let error = FetchError::unknown("something odd happened");
        assert!(error.to_string().contains("something odd happened"));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(
            FetchError::timeout("https://x").kind().as_str(),
            "timeout"
        );
        assert_eq!(
            FetchError::http_status("https://x", 500, "Internal Server Error")
                .kind()
                .as_str(),
            "http_status"
        );
        assert_eq!(
            FetchError::missing_config(&["k"]).kind().as_str(),
            "missing_config"
        );
        assert_eq!(
            FetchError::decode("https://x", decode_error()).kind().as_str(),
            "decode"
        );
        assert_eq!(FetchError::unknown("m").kind().as_str(), "unknown");
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(
            FetchError::http_status("https://x", 503, "Service Unavailable").status(),
            Some(503)
        );
        assert_eq!(FetchError::timeout("https://x").status(), None);
    }
}
