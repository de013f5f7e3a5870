//! Shared HTTP client construction policy for the fetch adapters.
//!
//! This module centralizes networking defaults so both fetch paths stay
//! consistent on timeout, user-agent, and compression.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::Client;

use crate::user_agent;

use super::FetchError;

/// Fixed outbound timeout for both fetch paths, in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

static FETCH_HTTP_TIMEOUT: RwLock<u64> = RwLock::new(REQUEST_TIMEOUT_SECS);

/// Configures the fetch HTTP timeout used by fetcher client builders.
///
/// Intended for test harness configuration before fetcher construction;
/// production callers keep the fixed default.
pub fn configure_fetch_http_timeout(timeout_secs: u64) {
    if let Ok(mut guard) = FETCH_HTTP_TIMEOUT.write() {
        *guard = timeout_secs;
    }
}

fn fetch_http_timeout() -> u64 {
    FETCH_HTTP_TIMEOUT
        .read()
        .map(|guard| *guard)
        .unwrap_or(REQUEST_TIMEOUT_SECS)
}

/// Builds a fetch HTTP client using shared project policy.
///
/// The same timeout bounds both the connect phase and the whole exchange.
///
/// # Errors
///
/// Returns [`FetchError::Unknown`] when client construction fails.
pub(crate) fn build_fetch_http_client() -> Result<Client, FetchError> {
    let timeout = Duration::from_secs(fetch_http_timeout());
    Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .user_agent(user_agent::default_fetch_user_agent())
        .gzip(true)
        .build()
        .map_err(|error| {
            FetchError::unknown(format!("HTTP client construction failed: {error}"))
        })
}
