//! Configuration management for nbquery
//!
//! The effective configuration is resolved exactly once at startup from the
//! parsed CLI (which itself layers flag > environment variable > default)
//! and is passed by reference into every operation afterwards. Nothing
//! mutates it after construction.

use crate::cli::Cli;
use crate::error::{NbqueryError, Result};

/// Runtime configuration for the Query API client
#[derive(Debug, Clone)]
pub struct Config {
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// API key sent as the `X-API-Key` header on every request
    pub api_key: String,
    /// Notebook UUID to query (may be substituted by the resolution policy
    /// if the server does not list it)
    pub notebook_id: String,
}

impl Config {
    /// Build the effective configuration from parsed CLI arguments
    ///
    /// clap has already applied the flag/env/default precedence, so this is
    /// pure normalization: the base URL is stripped of any trailing slash so
    /// endpoint paths can be appended uniformly.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            base_url: cli.url.trim_end_matches('/').to_string(),
            api_key: cli.api_key.clone(),
            notebook_id: cli.notebook.clone(),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `NbqueryError::Config` if the base URL or API key is empty,
    /// or if the base URL is not an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(NbqueryError::Config("API base URL cannot be empty".to_string()).into());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(NbqueryError::Config(format!(
                "API base URL must start with http:// or https://: {}",
                self.base_url
            ))
            .into());
        }
        if self.api_key.is_empty() {
            return Err(NbqueryError::Config("API key cannot be empty".to_string()).into());
        }
        Ok(())
    }
}
