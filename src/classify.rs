//! Input classification: URL vs. bare identifier.
//!
//! The translator service exposes two endpoints and the choice between them
//! is driven entirely by the shape of the user's input. Anything that does
//! not look like a web URL is treated as an identifier, whether or not it is
//! DOI-shaped; the search endpoint is expected to reject garbage on its own.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Regex pattern for DOI-shaped identifiers: `10.XXXX/suffix` with a
/// registrant code of at least 4 digits and a non-empty suffix.
#[allow(clippy::expect_used)]
static DOI_SHAPED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^10\.\d{4,}/\S+$").expect("DOI regex is valid") // Static pattern, safe to panic
});

/// Kind of input detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Direct HTTP/HTTPS URL
    Url,
    /// Bare identifier (DOI or free-form lookup term)
    Identifier,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url => write!(f, "URL"),
            Self::Identifier => write!(f, "identifier"),
        }
    }
}

/// Classifies user input as a URL or a bare identifier.
///
/// Rules, in order:
/// 1. Trimmed input starting with `http://` or `https://` is a [`InputKind::Url`].
/// 2. Everything else is an [`InputKind::Identifier`] - DOI-shaped strings
///    (`10.NNNN/suffix`) and arbitrary lookup terms alike. The permissive
///    fallback is deliberate; only the DOI shape is logged for diagnostics.
///
/// Pure function, no side effects beyond trace logging.
///
/// # Examples
///
/// ```
/// use citefetch_core::classify::{InputKind, classify_input};
///
/// assert_eq!(classify_input("https://arxiv.org/abs/1706.03762"), InputKind::Url);
/// assert_eq!(classify_input("10.2307/4486062"), InputKind::Identifier);
/// ```
#[must_use]
pub fn classify_input(input: &str) -> InputKind {
    let trimmed = input.trim();

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trace!(input = %trimmed, "classified input as URL");
        return InputKind::Url;
    }

    let doi_shaped = is_doi_shaped(trimmed);
    trace!(input = %trimmed, doi_shaped, "classified input as identifier");
    InputKind::Identifier
}

/// Returns true when the trimmed input matches the DOI shape `10.NNNN/suffix`.
#[must_use]
pub fn is_doi_shaped(input: &str) -> bool {
    DOI_SHAPED_PATTERN.is_match(input.trim())
}
