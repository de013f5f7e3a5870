//! Uniform result envelope shared by both fetch paths.
//!
//! The display layer renders one shape regardless of which upstream produced
//! the result; the normalizer here is pure field mapping.

use serde::Serialize;
use serde_json::Value;

use super::FetchError;

/// Payload returned by an upstream service.
#[derive(Debug, Clone, PartialEq)]
pub enum CitationPayload {
    /// Parsed JSON body (every format and endpoint except BibTeX).
    Json(Value),
    /// Opaque text body (the BibTeX format).
    Text(String),
}

impl CitationPayload {
    /// Returns true when the payload is parsed JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

/// A successful fetch: the payload plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationRecord {
    /// The response payload.
    pub payload: CitationPayload,
    /// The full upstream request URL that produced this record.
    pub source_url: String,
    /// The format name (citation API) or endpoint name (translator).
    pub origin: String,
}

impl CitationRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        payload: CitationPayload,
        source_url: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            payload,
            source_url: source_url.into(),
            origin: origin.into(),
        }
    }
}

/// The uniform success/failure envelope, serialized for display as
/// `{success, data, isJson, sourceUrl, formatOrEndpoint}` on success and
/// `{success, error, errorKind}` on failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutcome {
    /// Whether the fetch succeeded.
    pub success: bool,
    /// The payload: a JSON value, or a JSON string for text payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Whether `data` is parsed JSON (false for the text format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_json: Option<bool>,
    /// The full upstream request URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// The format or endpoint that produced the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_or_endpoint: Option<String>,
    /// Failure message, present only when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure kind label, present only when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl FetchOutcome {
    /// Wraps a fetch result into the uniform envelope.
    #[must_use]
    pub fn from_result(result: Result<CitationRecord, FetchError>) -> Self {
        match result {
            Ok(record) => Self::from_record(record),
            Err(error) => Self::from_error(&error),
        }
    }

    /// Wraps a successful record.
    #[must_use]
    pub fn from_record(record: CitationRecord) -> Self {
        let is_json = record.payload.is_json();
        let data = match record.payload {
            CitationPayload::Json(value) => value,
            CitationPayload::Text(text) => Value::String(text),
        };
        Self {
            success: true,
            data: Some(data),
            is_json: Some(is_json),
            source_url: Some(record.source_url),
            format_or_endpoint: Some(record.origin),
            error: None,
            error_kind: None,
        }
    }

    /// Wraps a failure.
    #[must_use]
    pub fn from_error(error: &FetchError) -> Self {
        Self {
            success: false,
            data: None,
            is_json: None,
            source_url: None,
            format_or_endpoint: None,
            error: Some(error.to_string()),
            error_kind: Some(error.kind().as_str().to_string()),
        }
    }
}
