//! Citation fetch adapters for the two upstream services.
//!
//! This module provides the adapters that turn a user's URL or identifier
//! into citation metadata, normalizing two very different upstreams into one
//! result envelope.
//!
//! # Architecture
//!
//! - [`CitoidFetcher`] - GET adapter for the public citation API (four
//!   output formats; one of them plain text, the rest JSON)
//! - [`TranslatorFetcher`] - POST adapter for a self-hosted translator
//!   service (endpoint chosen by input classification; always JSON)
//! - [`FetchError`] - the shared error taxonomy both adapters map into
//! - [`FetchOutcome`] - the uniform success/failure envelope the display
//!   layer renders
//!
//! # Example
//!
//! ```no_run
//! use citefetch_core::fetch::{CitationFormat, CitoidFetcher, FetchOutcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = CitoidFetcher::new()?;
//! let result = fetcher
//!     .fetch("https://arxiv.org/abs/1706.03762", CitationFormat::Zotero)
//!     .await;
//! let envelope = FetchOutcome::from_result(result);
//! println!("{}", serde_json::to_string_pretty(&envelope)?);
//! # Ok(())
//! # }
//! ```

mod citoid;
mod envelope;
mod error;
mod http;
mod translator;

pub use citoid::CitoidFetcher;
pub use envelope::{CitationPayload, CitationRecord, FetchOutcome};
pub use error::{FetchError, FetchErrorKind};
pub use http::configure_fetch_http_timeout;
pub use translator::TranslatorFetcher;

use std::fmt;

use crate::classify::InputKind;

/// Citation output formats supported by the public citation API.
///
/// The format only affects the citation API path; the translator service
/// always returns one JSON shape regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationFormat {
    /// Zotero item JSON
    Zotero,
    /// MediaWiki citation template JSON
    Mediawiki,
    /// MediaWiki JSON with base fields resolved
    MediawikiBasefields,
    /// Raw BibTeX text (the one plain-text format)
    Bibtex,
}

impl CitationFormat {
    /// All formats, in the order the upstream service documents them.
    pub const ALL: [Self; 4] = [
        Self::Zotero,
        Self::Mediawiki,
        Self::MediawikiBasefields,
        Self::Bibtex,
    ];

    /// Returns the format name as it appears in the request path.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Zotero => "zotero",
            Self::Mediawiki => "mediawiki",
            Self::MediawikiBasefields => "mediawiki-basefields",
            Self::Bibtex => "bibtex",
        }
    }

    /// Parses a wire name back into a format.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }

    /// Returns true when the upstream responds with plain text for this
    /// format instead of JSON.
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::Bibtex)
    }
}

impl fmt::Display for CitationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Translator service endpoint, derived from input classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorEndpoint {
    /// `/search` - bare identifiers (DOIs, free-form lookup terms)
    Search,
    /// `/web` - full URLs
    Web,
}

impl TranslatorEndpoint {
    /// Selects the endpoint for a classified input.
    #[must_use]
    pub fn for_input(kind: InputKind) -> Self {
        match kind {
            InputKind::Identifier => Self::Search,
            InputKind::Url => Self::Web,
        }
    }

    /// Returns the endpoint path segment.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for TranslatorEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
