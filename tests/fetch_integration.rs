//! Integration tests for the fetch adapters through the public API.
//!
//! Everything here runs against wiremock upstreams; nothing touches the
//! real services.

use citefetch_core::{
    CitationFormat, CitoidFetcher, FetchErrorKind, FetchOutcome, InputKind, TranslatorFetcher,
    TranslatorSettings, classify_input, compare_services,
};
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

fn translator_for(base_url: impl Into<String>) -> TranslatorFetcher {
    TranslatorFetcher::new(TranslatorSettings {
        base_url: base_url.into(),
        api_key: "integration-key".to_string(),
    })
    .unwrap()
}

fn citation_json() -> serde_json::Value {
    serde_json::json!([{
        "itemType": "journalArticle",
        "title": "A Programmable Dual-RNA-Guided DNA Endonuclease",
        "DOI": "10.1126/science.1225829"
    }])
}

// ==================== Classification ====================

#[test]
fn test_classification_examples_from_both_shapes() {
    assert_eq!(classify_input("10.2307/4486062"), InputKind::Identifier);
    assert_eq!(
        classify_input("https://arxiv.org/abs/1706.03762"),
        InputKind::Url
    );
    assert_eq!(classify_input("http://example.com"), InputKind::Url);
    // Permissive fallback: non-URL, non-DOI input is still an identifier.
    assert_eq!(classify_input("some lookup phrase"), InputKind::Identifier);
}

// ==================== Format matrix ====================

#[tokio::test]
async fn test_citoid_is_json_flag_matches_format_in_all_four_cases() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    for format in [
        CitationFormat::Zotero,
        CitationFormat::Mediawiki,
        CitationFormat::MediawikiBasefields,
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/{}/10.1234%2Fexample", format.wire_name())))
            .respond_with(ResponseTemplate::new(200).set_body_json(citation_json()))
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/bibtex/10.1234%2Fexample"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("@article{key, title={A Title}}"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = CitoidFetcher::with_base_url(mock_server.uri()).unwrap();

    for format in CitationFormat::ALL {
        let outcome =
            FetchOutcome::from_result(fetcher.fetch("10.1234/example", format).await);
        assert!(outcome.success, "{format} fetch should succeed");
        assert_eq!(
            outcome.is_json,
            Some(!format.is_text()),
            "isJson flag must match the format rule for {format}"
        );
        assert_eq!(outcome.format_or_endpoint.as_deref(), Some(format.wire_name()));
    }
}

// ==================== Request encoding ====================

#[tokio::test]
async fn test_citoid_percent_encodes_url_input_into_one_path_segment() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    // The mock only matches the fully-encoded input; a raw space or an
    // unescaped slash would produce a different path and fail the fetch.
    Mock::given(method("GET"))
        .and(path("/zotero/https%3A%2F%2Fexample.com%2Fa%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(citation_json()))
        .mount(&mock_server)
        .await;

    let fetcher = CitoidFetcher::with_base_url(mock_server.uri()).unwrap();
    let record = fetcher
        .fetch("https://example.com/a b", CitationFormat::Zotero)
        .await
        .unwrap();

    assert!(!record.source_url.contains(' '));
    assert!(record.source_url.ends_with("/zotero/https%3A%2F%2Fexample.com%2Fa%20b"));
}

// ==================== Endpoint selection ====================

#[tokio::test]
async fn test_translator_selects_search_for_doi_and_web_for_url() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string("10.1038/nature12373"))
        .respond_with(ResponseTemplate::new(200).set_body_json(citation_json()))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/web"))
        .and(body_string("https://github.com/x/y"))
        .respond_with(ResponseTemplate::new(200).set_body_json(citation_json()))
        .mount(&mock_server)
        .await;

    let fetcher = translator_for(mock_server.uri());

    let search_record = fetcher.fetch("10.1038/nature12373").await.unwrap();
    assert_eq!(search_record.origin, "search");

    let web_record = fetcher.fetch("https://github.com/x/y").await.unwrap();
    assert_eq!(web_record.origin, "web");
}

// ==================== Error kinds ====================

#[tokio::test]
async fn test_http_status_kinds_are_never_unknown() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let citoid = CitoidFetcher::with_base_url(mock_server.uri()).unwrap();
    let citoid_error = citoid
        .fetch("10.1234/example", CitationFormat::Zotero)
        .await
        .unwrap_err();
    assert_eq!(citoid_error.kind(), FetchErrorKind::HttpStatus);
    assert_eq!(citoid_error.status(), Some(404));

    let translator = translator_for(mock_server.uri());
    let translator_error = translator.fetch("10.1234/example").await.unwrap_err();
    assert_eq!(translator_error.kind(), FetchErrorKind::HttpStatus);
    assert_eq!(translator_error.status(), Some(500));
}

#[tokio::test]
async fn test_connection_refused_kind_on_both_paths() {
    let Some(listener) = std::net::TcpListener::bind("127.0.0.1:0").ok() else {
        eprintln!("cannot bind localhost socket; skipping connectivity test");
        return;
    };
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let dead_base = format!("http://127.0.0.1:{port}");

    let citoid = CitoidFetcher::with_base_url(&dead_base).unwrap();
    let citoid_error = citoid
        .fetch("10.1234/example", CitationFormat::Zotero)
        .await
        .unwrap_err();
    assert_eq!(citoid_error.kind(), FetchErrorKind::Connectivity);

    let translator = translator_for(&dead_base);
    let translator_error = translator.fetch("10.1234/example").await.unwrap_err();
    assert_eq!(translator_error.kind(), FetchErrorKind::Connectivity);
}

// ==================== Missing configuration ====================

#[tokio::test]
async fn test_missing_config_fails_before_any_outbound_call() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    // Any request reaching the server fails the test on drop.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(citation_json()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let error = TranslatorSettings::resolve(&[]).unwrap_err();
    assert_eq!(error.kind(), FetchErrorKind::MissingConfig);

    mock_server.verify().await;
}

// ==================== Idempotence ====================

#[tokio::test]
async fn test_repeated_fetch_yields_structurally_identical_envelope() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(citation_json()))
        .mount(&mock_server)
        .await;

    let fetcher = CitoidFetcher::with_base_url(mock_server.uri()).unwrap();

    let first = serde_json::to_value(FetchOutcome::from_result(
        fetcher.fetch("10.1234/example", CitationFormat::Zotero).await,
    ))
    .unwrap();
    let second = serde_json::to_value(FetchOutcome::from_result(
        fetcher.fetch("10.1234/example", CitationFormat::Zotero).await,
    ))
    .unwrap();

    assert_eq!(first, second, "no hidden state accumulates between calls");
}

// ==================== Comparison mode ====================

#[tokio::test]
async fn test_comparison_returns_both_envelopes_with_independent_outcomes() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(citation_json()))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream translator down"))
        .mount(&mock_server)
        .await;

    let citoid = CitoidFetcher::with_base_url(mock_server.uri()).unwrap();
    let translator = translator_for(mock_server.uri());

    let outcome =
        compare_services(&citoid, &translator, "10.1234/example", CitationFormat::Zotero).await;

    assert!(outcome.citoid.success);
    assert!(!outcome.translator.success);
    assert_eq!(outcome.translator.error_kind.as_deref(), Some("http_status"));
    assert!(
        outcome
            .translator
            .error
            .as_deref()
            .unwrap()
            .contains("upstream translator down"),
        "translator error detail must include the response body"
    );
}
