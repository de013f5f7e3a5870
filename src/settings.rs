//! Layered credential resolution for the translator service.
//!
//! Values are resolved from an ordered list of sources; the first source
//! returning a non-empty value wins. The default order is the secrets file
//! followed by process environment variables, so a managed secrets file
//! takes precedence over the environment fallback.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::fetch::FetchError;

/// A logical configuration value required by the translator fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialValue {
    /// The translator service base URL.
    ApiUrl,
    /// The translator service API key.
    ApiKey,
}

impl CredentialValue {
    /// Environment variable name for this value (fallback source).
    #[must_use]
    pub fn env_name(self) -> &'static str {
        match self {
            Self::ApiUrl => "ZOTERO_API_URL",
            Self::ApiKey => "ZOTERO_API_KEY",
        }
    }

    /// Secrets-file key for this value (precedence source).
    #[must_use]
    pub fn secret_key(self) -> &'static str {
        match self {
            Self::ApiUrl => "zotero.api_url",
            Self::ApiKey => "zotero.api_key",
        }
    }

    /// Human-readable name used in missing-configuration errors.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::ApiUrl => "translator base URL (zotero.api_url / ZOTERO_API_URL)",
            Self::ApiKey => "translator API key (zotero.api_key / ZOTERO_API_KEY)",
        }
    }
}

/// A named-value source in the layered configuration chain.
pub trait CredentialSource {
    /// Returns the non-empty value for `value`, if this source has one.
    fn lookup(&self, value: CredentialValue) -> Option<String>;
}

/// Process-environment source (the fallback layer).
#[derive(Debug, Default)]
pub struct EnvSource;

impl CredentialSource for EnvSource {
    fn lookup(&self, value: CredentialValue) -> Option<String> {
        env_var_non_empty(value.env_name())
    }
}

fn env_var_non_empty(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Secrets-file source (the precedence layer).
///
/// The file is a line-based `key = "value"` list with `#` comments, e.g.
///
/// ```text
/// zotero.api_url = "https://translate.example"  # self-hosted instance
/// zotero.api_key = "s3cret"
/// ```
#[derive(Debug, Default)]
pub struct SecretsFile {
    values: HashMap<String, String>,
}

impl SecretsFile {
    /// Loads the default secrets file if present.
    ///
    /// An absent file yields an empty source, which simply defers to the
    /// next layer; only an unreadable or malformed file is an error.
    pub fn load_default() -> Result<Self> {
        match resolve_default_secrets_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads a secrets file from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read secrets file '{}'", path.display()))?;
        parse_secrets_str(&raw)
            .with_context(|| format!("Failed to parse secrets file '{}'", path.display()))
    }
}

impl CredentialSource for SecretsFile {
    fn lookup(&self, value: CredentialValue) -> Option<String> {
        self.values
            .get(value.secret_key())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Resolves the default secrets file path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/citefetch/secrets.toml`
/// 2. `$HOME/.config/citefetch/secrets.toml`
#[must_use]
pub fn resolve_default_secrets_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("citefetch")
                .join("secrets.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("citefetch")
            .join("secrets.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

fn parse_secrets_str(raw: &str) -> Result<SecretsFile> {
    let mut values = HashMap::new();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid secrets syntax on line {}: expected key = \"value\"",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = parse_string_literal(raw_value.trim())
            .with_context(|| format!("Invalid value for `{}` on line {}", key, line_index + 1))?;
        values.insert(key.to_string(), value);
    }
    Ok(SecretsFile { values })
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

/// Resolved translator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorSettings {
    /// Base URL of the translator service.
    pub base_url: String,
    /// API key sent in the request header.
    pub api_key: String,
}

impl TranslatorSettings {
    /// Resolves settings from the default layered sources: secrets file,
    /// then environment.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingConfig`] naming the absent value(s), or
    /// [`FetchError::Unknown`] for an unreadable secrets file or a present
    /// but invalid base URL. Raised before any network call is attempted.
    pub fn resolve_default() -> Result<Self, FetchError> {
        let secrets = SecretsFile::load_default()
            .map_err(|error| FetchError::unknown(format!("{error:#}")))?;
        Self::resolve(&[&secrets, &EnvSource])
    }

    /// Resolves settings from an ordered source list; the first non-empty
    /// value per key wins.
    ///
    /// # Errors
    ///
    /// See [`TranslatorSettings::resolve_default`].
    pub fn resolve(sources: &[&dyn CredentialSource]) -> Result<Self, FetchError> {
        let base_url = resolve_value(sources, CredentialValue::ApiUrl);
        let api_key = resolve_value(sources, CredentialValue::ApiKey);

        match (base_url, api_key) {
            (Some(base_url), Some(api_key)) => {
                url::Url::parse(&base_url).map_err(|error| {
                    FetchError::unknown(format!(
                        "invalid translator base URL '{base_url}': {error}"
                    ))
                })?;
                Ok(Self { base_url, api_key })
            }
            (base_url, api_key) => {
                let mut missing = Vec::new();
                if base_url.is_none() {
                    missing.push(CredentialValue::ApiUrl.description());
                }
                if api_key.is_none() {
                    missing.push(CredentialValue::ApiKey.description());
                }
                Err(FetchError::missing_config(&missing))
            }
        }
    }
}

fn resolve_value(sources: &[&dyn CredentialSource], value: CredentialValue) -> Option<String> {
    sources.iter().find_map(|source| source.lookup(value))
}
