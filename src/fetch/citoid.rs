//! Citation API fetcher - retrieves citation metadata from the public
//! citation endpoint.
//!
//! The [`CitoidFetcher`] issues a GET against
//! `{base}/{format}/{percent-encoded input}` and returns the body as parsed
//! JSON, or as opaque text for the BibTeX format.

use reqwest::Client;
use tracing::{debug, warn};

use super::envelope::{CitationPayload, CitationRecord};
use super::http::build_fetch_http_client;
use super::{CitationFormat, FetchError};

/// Default citation API base URL.
const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1/data/citation";

/// Fetches citation metadata from the public citation API.
///
/// The input may be a URL or a bare identifier; the service resolves either.
/// All reserved characters in the input are percent-encoded so the input
/// always occupies exactly one path segment of the request URL.
pub struct CitoidFetcher {
    client: Client,
    base_url: String,
}

impl CitoidFetcher {
    /// Creates a new `CitoidFetcher` against the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if HTTP client construction fails.
    pub fn new() -> Result<Self, FetchError> {
        Self::build(DEFAULT_BASE_URL.to_string())
    }

    /// Creates a `CitoidFetcher` with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if HTTP client construction fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::build(base_url.into())
    }

    fn build(base_url: String) -> Result<Self, FetchError> {
        let client = build_fetch_http_client()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the request URL: `{base}/{format}/{percent-encoded input}`.
    ///
    /// Encoding uses no safe set, so `/`, `:`, spaces, and every other
    /// reserved character in the input are escaped.
    fn request_url(&self, input: &str, format: CitationFormat) -> String {
        let encoded = urlencoding::encode(input);
        format!("{}/{}/{}", self.base_url, format.wire_name(), encoded)
    }

    /// Fetches citation metadata for `input` in the requested `format`.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] kind matching the failure: `Connectivity`,
    /// `Timeout`, `HttpStatus` (with the status code and reason phrase), or
    /// `Decode` when a JSON format yields an unparseable body.
    #[tracing::instrument(skip(self), fields(format = %format))]
    pub async fn fetch(
        &self,
        input: &str,
        format: CitationFormat,
    ) -> Result<CitationRecord, FetchError> {
        let url = self.request_url(input, format);
        debug!(api_url = %url, "Calling citation API");

        let response = self.client.get(&url).send().await.map_err(|error| {
            warn!(error = %error, "citation API request failed");
            FetchError::from_transport(&url, error)
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .unwrap_or("unrecognized status")
                .to_string();
            debug!(status = status.as_u16(), %reason, "citation API error status");
            return Err(FetchError::http_status(&url, status.as_u16(), reason));
        }

        let body = response
            .text()
            .await
            .map_err(|error| FetchError::from_transport(&url, error))?;

        let payload = if format.is_text() {
            CitationPayload::Text(body)
        } else {
            let value = serde_json::from_str(&body).map_err(|error| {
                warn!(error = %error, "citation API returned unparseable JSON");
                FetchError::decode(&url, error)
            })?;
            CitationPayload::Json(value)
        };

        Ok(CitationRecord::new(payload, url, format.wire_name()))
    }
}

impl std::fmt::Debug for CitoidFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitoidFetcher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
