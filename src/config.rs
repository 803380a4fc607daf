//! Application configuration
//!
//! Everything is read from the process environment. A `.env` file in the
//! working directory is loaded first when present, so local development can
//! keep the API key out of the shell profile.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::unsplash::SEARCH_URL;

/// Unsplash access key (required)
pub const ACCESS_KEY_VAR: &str = "UNSPLASH_ACCESS_KEY";
/// Name the key had in the web build; still honoured
pub const ACCESS_KEY_ALIAS_VAR: &str = "VITE_UNSPLASH_API_KEY";
/// Override for the search endpoint
pub const API_URL_VAR: &str = "SEARCHSHOTS_API_URL";
/// Debounce delay in milliseconds
pub const DEBOUNCE_VAR: &str = "SEARCHSHOTS_DEBOUNCE_MS";
/// Directory downloads are written to without asking
pub const DOWNLOAD_DIR_VAR: &str = "SEARCHSHOTS_DOWNLOAD_DIR";

/// Default quiet period before a typed query is searched
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing Unsplash access key: set UNSPLASH_ACCESS_KEY")]
    MissingAccessKey,
    #[error("SEARCHSHOTS_DEBOUNCE_MS must be a whole number of milliseconds, got '{0}'")]
    InvalidDebounce(String),
    #[error("SEARCHSHOTS_API_URL is not a valid URL: {0}")]
    InvalidApiUrl(String),
}

/// Resolved configuration for one run of the application
#[derive(Debug, Clone)]
pub struct Config {
    /// Client credential sent as `client_id`
    pub access_key: String,
    /// Search endpoint
    pub api_url: String,
    /// Debounce delay for the search box
    pub debounce: Duration,
    /// When set, downloads skip the save dialog and land here
    pub download_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let access_key = get(ACCESS_KEY_VAR)
            .or_else(|| get(ACCESS_KEY_ALIAS_VAR))
            .ok_or(ConfigError::MissingAccessKey)?;

        let api_url = match get(API_URL_VAR) {
            Some(url) => {
                reqwest::Url::parse(&url).map_err(|e| ConfigError::InvalidApiUrl(e.to_string()))?;
                url
            }
            None => SEARCH_URL.to_string(),
        };

        let debounce = match get(DEBOUNCE_VAR) {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidDebounce(raw))?,
            None => DEFAULT_DEBOUNCE,
        };

        let download_dir = get(DOWNLOAD_DIR_VAR).map(PathBuf::from);

        Ok(Self {
            access_key,
            api_url,
            debounce,
            download_dir,
        })
    }
}
