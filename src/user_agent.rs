//! Shared User-Agent string for the fetch HTTP clients.
//!
//! Single source for project URL and UA format so traffic to both upstream
//! services stays consistent and easy to update (good citizenship; RFC 9308).

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/citefetch";

/// Default User-Agent for citation fetch requests (identifies the tool).
///
/// Both fetch paths send the same fixed identifying header.
#[must_use]
pub(crate) fn default_fetch_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("citefetch/{version} (citation-metadata-tool; +{PROJECT_UA_URL})")
}
