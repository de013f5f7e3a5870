//! Side-by-side comparison of the two fetch paths.
//!
//! The two calls are logically independent, so comparison mode issues them
//! concurrently with an ordinary two-way join; both envelopes are required
//! before render.

use serde::Serialize;

use crate::fetch::{CitationFormat, CitoidFetcher, FetchOutcome, TranslatorFetcher};

/// Envelopes from both services for one input.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonOutcome {
    /// Envelope from the public citation API.
    pub citoid: FetchOutcome,
    /// Envelope from the translator service.
    pub translator: FetchOutcome,
}

impl ComparisonOutcome {
    /// Returns true when both envelopes succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.citoid.success && self.translator.success
    }
}

/// Fetches `input` from both services concurrently and wraps both results.
///
/// A failure on one path never hides the other's result; each envelope
/// carries its own success flag and error kind.
pub async fn compare_services(
    citoid: &CitoidFetcher,
    translator: &TranslatorFetcher,
    input: &str,
    format: CitationFormat,
) -> ComparisonOutcome {
    let (citoid_result, translator_result) =
        tokio::join!(citoid.fetch(input, format), translator.fetch(input));

    ComparisonOutcome {
        citoid: FetchOutcome::from_result(citoid_result),
        translator: FetchOutcome::from_result(translator_result),
    }
}
