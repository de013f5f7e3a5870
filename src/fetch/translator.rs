//! Translator service fetcher - posts the raw input to a self-hosted
//! translator service.
//!
//! The [`TranslatorFetcher`] chooses between the `/search` and `/web`
//! endpoints based on input classification and always parses the response
//! as JSON. It is constructed from resolved [`TranslatorSettings`], so a
//! missing base URL or API key fails before any network call is attempted.

use reqwest::Client;
use tracing::{debug, warn};

use crate::classify::classify_input;
use crate::settings::TranslatorSettings;

use super::envelope::{CitationPayload, CitationRecord};
use super::http::build_fetch_http_client;
use super::{FetchError, TranslatorEndpoint};

/// Header carrying the translator service API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Fetches citation metadata from a configured translator service.
pub struct TranslatorFetcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TranslatorFetcher {
    /// Creates a fetcher from resolved translator settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if HTTP client construction fails.
    pub fn new(settings: TranslatorSettings) -> Result<Self, FetchError> {
        let client = build_fetch_http_client()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key,
        })
    }

    /// Builds the endpoint URL: base URL (trailing slash stripped) plus the
    /// endpoint path segment.
    fn endpoint_url(&self, endpoint: TranslatorEndpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    /// Fetches citation metadata for `input`.
    ///
    /// Identifiers go to `/search`, URLs to `/web`; the body is the raw
    /// unmodified input in both cases.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] kind matching the failure: `Connectivity`,
    /// `Timeout`, `HttpStatus` (detail prefers the response body, since this
    /// service returns structured error bodies), or `Decode` when the body
    /// is not valid JSON.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, input: &str) -> Result<CitationRecord, FetchError> {
        let endpoint = TranslatorEndpoint::for_input(classify_input(input));
        let url = self.endpoint_url(endpoint);
        debug!(api_url = %url, endpoint = %endpoint, "Calling translator service");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("content-type", "text/plain")
            .body(input.to_string())
            .send()
            .await
            .map_err(|error| {
                warn!(error = %error, "translator service request failed");
                FetchError::from_transport(&url, error)
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unrecognized status");
            // The service puts diagnostic detail in the error body; fall back
            // to the reason phrase when the body is empty or unreadable.
            let body = response.text().await.unwrap_or_default();
            let detail = if body.trim().is_empty() {
                reason.to_string()
            } else {
                body.trim().to_string()
            };
            debug!(status = status.as_u16(), %detail, "translator service error status");
            return Err(FetchError::http_status(&url, status.as_u16(), detail));
        }

        let body = response
            .text()
            .await
            .map_err(|error| FetchError::from_transport(&url, error))?;
        let value = serde_json::from_str(&body).map_err(|error| {
            warn!(error = %error, "translator service returned unparseable JSON");
            FetchError::decode(&url, error)
        })?;

        Ok(CitationRecord::new(
            CitationPayload::Json(value),
            url,
            endpoint.path(),
        ))
    }
}

impl std::fmt::Debug for TranslatorFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key intentionally omitted.
        f.debug_struct("TranslatorFetcher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
