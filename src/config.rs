//! The config module resolves where the summarization API lives.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use url::Url;

use crate::constants::DEFAULT_API_BASE_URL;
use crate::storage::Preferences;

/// Strips a single trailing slash so endpoint paths can be appended directly.
pub fn normalize_base_url(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_owned()
}

/// Resolves the API base URL from, in priority order, the explicit `override_url`,
/// the persisted preference and [`DEFAULT_API_BASE_URL`].
///
/// An explicit override is persisted for subsequent sessions.
///
/// # Errors
///
/// Returns an error if the override is not an absolute URL or if the preference
/// store fails.
pub fn resolve_api_base_url(
    override_url: Option<&str>,
    preferences: &Preferences,
) -> Result<String> {
    if let Some(url) = override_url.filter(|url| !url.is_empty()) {
        Url::parse(url).with_context(|| format!("Invalid API URL: {url}"))?;
        let url = normalize_base_url(url);
        preferences.set_api_base_url(&url)?;
        info!("Using API at {url} (saved for next sessions)");
        return Ok(url);
    }

    let url = match preferences.api_base_url()? {
        Some(stored) if !stored.is_empty() => stored,
        _ => DEFAULT_API_BASE_URL.to_owned(),
    };
    debug!("Using API at {url}");

    Ok(normalize_base_url(&url))
}

/// Default location of the preference database.
pub fn default_preferences_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("textsum")
        .join("preferences.db")
}
