//! CLI entry point for the citefetch tool.

use std::fs;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::Value;
use tracing::{debug, info, warn};

use citefetch_core::{
    CitationFormat, CitoidFetcher, ComparisonOutcome, FetchError, FetchOutcome, TranslatorFetcher,
    TranslatorSettings, compare_services,
};

mod cli;

use cli::{Args, ServiceChoice};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr so stdout stays clean for the rendered envelope.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let input = args.input.trim().to_string();
    if input.is_empty() {
        bail!("input must not be empty");
    }

    info!(service = ?args.service, input = %input, "Fetching citation metadata");

    let (rendered, success, payload) = match args.service {
        ServiceChoice::Citoid => {
            let outcome = fetch_citoid(&input, args.format).await;
            (
                render_envelope(&outcome)?,
                outcome.success,
                payload_contents(&outcome).transpose()?,
            )
        }
        ServiceChoice::Translator => {
            let outcome = fetch_translator(&input).await;
            (
                render_envelope(&outcome)?,
                outcome.success,
                payload_contents(&outcome).transpose()?,
            )
        }
        ServiceChoice::Both => {
            let outcome = fetch_both(&input, args.format).await;
            let rendered = serde_json::to_string_pretty(&outcome)
                .context("failed to render comparison envelope")?;
            let success = outcome.all_succeeded();
            (rendered.clone(), success, Some(rendered))
        }
    };

    println!("{rendered}");

    if let Some(path) = &args.output {
        if let Some(contents) = payload {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
            info!(path = %path.display(), "Wrote fetched payload");
        } else {
            warn!("fetch failed; skipping output file");
        }
    }

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// Fetches from the public citation API, folding construction failures into
/// the envelope.
async fn fetch_citoid(input: &str, format: CitationFormat) -> FetchOutcome {
    match CitoidFetcher::new() {
        Ok(fetcher) => FetchOutcome::from_result(fetcher.fetch(input, format).await),
        Err(error) => FetchOutcome::from_error(&error),
    }
}

/// Fetches from the translator service; missing configuration surfaces as a
/// failed envelope before any network call.
async fn fetch_translator(input: &str) -> FetchOutcome {
    match build_translator() {
        Ok(fetcher) => FetchOutcome::from_result(fetcher.fetch(input).await),
        Err(error) => FetchOutcome::from_error(&error),
    }
}

fn build_translator() -> Result<TranslatorFetcher, FetchError> {
    let settings = TranslatorSettings::resolve_default()?;
    TranslatorFetcher::new(settings)
}

/// Fetches from both services for side-by-side comparison.
async fn fetch_both(input: &str, format: CitationFormat) -> ComparisonOutcome {
    match (CitoidFetcher::new(), build_translator()) {
        (Ok(citoid), Ok(translator)) => {
            compare_services(&citoid, &translator, input, format).await
        }
        (citoid, translator) => {
            // One side failed to construct; its envelope carries the
            // construction error and the other side still fetches.
            let citoid_outcome = match citoid {
                Ok(fetcher) => FetchOutcome::from_result(fetcher.fetch(input, format).await),
                Err(error) => FetchOutcome::from_error(&error),
            };
            let translator_outcome = match translator {
                Ok(fetcher) => FetchOutcome::from_result(fetcher.fetch(input).await),
                Err(error) => FetchOutcome::from_error(&error),
            };
            ComparisonOutcome {
                citoid: citoid_outcome,
                translator: translator_outcome,
            }
        }
    }
}

/// Renders an envelope for stdout: raw text for a successful text-format
/// fetch, the pretty-printed envelope JSON otherwise.
fn render_envelope(outcome: &FetchOutcome) -> Result<String> {
    if outcome.success
        && outcome.is_json == Some(false)
        && let Some(Value::String(text)) = &outcome.data
    {
        return Ok(text.clone());
    }
    serde_json::to_string_pretty(outcome).context("failed to render envelope")
}

/// Returns the payload contents for `--output`: pretty JSON for JSON
/// payloads, the raw text otherwise. `None` when the fetch failed.
fn payload_contents(outcome: &FetchOutcome) -> Option<Result<String>> {
    if !outcome.success {
        return None;
    }
    let data = outcome.data.as_ref()?;
    Some(match data {
        Value::String(text) if outcome.is_json == Some(false) => Ok(text.clone()),
        value => serde_json::to_string_pretty(value).context("failed to render payload"),
    })
}
