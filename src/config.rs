//! Settings for the Breezy integration
//!
//! Credentials and the company identifier come from the host's static
//! configuration. Keys follow the host's naming (`breezy_email`,
//! `breezy_password`, `breezy_company_id`); the remaining keys are optional.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Breezy API base URL
pub const BREEZY_API_BASE_URL: &str = "https://breezy.hr/public/api/v3";

/// How long the access token is cached locally (1 day)
///
/// The remote side keeps tokens valid for 30 days; the shorter local window
/// forces periodic re-authentication.
pub const TOKEN_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// How long the positions list and position details are cached
pub const DATA_CACHE_TTL_SECS: u64 = 120;

/// Errors that can occur when loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings content is not valid TOML or has the wrong shape
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required value is empty
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}

/// Static configuration for the API manager
#[derive(Clone, Deserialize)]
pub struct BreezySettings {
    /// Account email used to sign in
    #[serde(rename = "breezy_email")]
    pub email: String,
    /// Account password used to sign in
    #[serde(rename = "breezy_password")]
    pub password: String,
    /// Company whose positions are listed
    #[serde(rename = "breezy_company_id")]
    pub company_id: String,
    /// API base URL (overridable for staging or tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Local cache lifetime of the access token, in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// Local cache lifetime of positions and position details, in seconds
    #[serde(default = "default_data_ttl")]
    pub data_ttl_secs: u64,
}

fn default_base_url() -> String {
    BREEZY_API_BASE_URL.to_string()
}

fn default_token_ttl() -> u64 {
    TOKEN_CACHE_TTL_SECS
}

fn default_data_ttl() -> u64 {
    DATA_CACHE_TTL_SECS
}

impl BreezySettings {
    /// Creates settings with the default base URL and cache lifetimes
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        company_id: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            company_id: company_id.into(),
            base_url: default_base_url(),
            token_ttl_secs: TOKEN_CACHE_TTL_SECS,
            data_ttl_secs: DATA_CACHE_TTL_SECS,
        }
    }

    /// Overrides the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Parses settings from TOML text and validates them
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: BreezySettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a TOML file and validates them
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks that the credentials and company id are present
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.email.trim().is_empty() {
            return Err(ConfigError::Missing("breezy_email"));
        }
        if self.password.is_empty() {
            return Err(ConfigError::Missing("breezy_password"));
        }
        if self.company_id.trim().is_empty() {
            return Err(ConfigError::Missing("breezy_company_id"));
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl fmt::Debug for BreezySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreezySettings")
            .field("email", &self.email)
            .field("password", &"***")
            .field("company_id", &self.company_id)
            .field("base_url", &self.base_url)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("data_ttl_secs", &self.data_ttl_secs)
            .finish()
    }
}
