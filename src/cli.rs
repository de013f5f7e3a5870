//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use citefetch_core::CitationFormat;

/// Fetch bibliographic citation metadata for a URL or identifier.
///
/// Citefetch queries a public citation API and/or a self-hosted translator
/// service and prints a uniform result envelope. Try it with a DOI
/// (`10.1038/nature12373`) or an article URL
/// (`https://arxiv.org/abs/1706.03762`).
#[derive(Parser, Debug)]
#[command(name = "citefetch")]
#[command(author, version, about)]
pub struct Args {
    /// URL or bare identifier to fetch citation metadata for
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Citation format for the citation API: zotero, mediawiki,
    /// mediawiki-basefields, or bibtex
    #[arg(short, long, default_value = "zotero", value_parser = parse_format)]
    pub format: CitationFormat,

    /// Service to query: citoid, translator, or both (side-by-side)
    #[arg(short, long, default_value = "citoid", value_parser = parse_service)]
    pub service: ServiceChoice,

    /// Also write the fetched payload to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Which upstream service(s) to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceChoice {
    /// Public citation API only
    Citoid,
    /// Translator service only
    Translator,
    /// Both, compared side by side
    Both,
}

fn parse_format(raw: &str) -> Result<CitationFormat, String> {
    CitationFormat::from_wire_name(raw).ok_or_else(|| {
        format!(
            "unknown format '{raw}' (expected one of: zotero, mediawiki, mediawiki-basefields, bibtex)"
        )
    })
}

fn parse_service(raw: &str) -> Result<ServiceChoice, String> {
    match raw {
        "citoid" => Ok(ServiceChoice::Citoid),
        "translator" => Ok(ServiceChoice::Translator),
        "both" => Ok(ServiceChoice::Both),
        _ => Err(format!(
            "unknown service '{raw}' (expected one of: citoid, translator, both)"
        )),
    }
}
