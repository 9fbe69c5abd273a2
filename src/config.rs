//! Server configuration from environment variables.
//!
//! - `BIN_PROVIDER_URL`: BIN metadata API base URL (default `https://lookup.binlist.net`)
//! - `OLDUBIL_DOCS_DIR`: directory scanned for OlduBil PDFs (default: the executable's directory)
//! - `MCP_HTTP_ADDR`: bind address used by `--http` when no address is given (default `0.0.0.0:8080`)
//!
//! Adapter-specific settings are resolved on demand, so each server only
//! fails on the variables it actually reads.

use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_BIN_PROVIDER_URL: &str = "https://lookup.binlist.net";
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIN_PROVIDER_URL '{url}' is not a valid http(s) URL: {reason}")]
    InvalidProviderUrl { url: String, reason: String },
    #[error("cannot locate the executable directory: {0}")]
    ExecutableDir(#[source] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    bin_provider_url: Option<String>,
    documents_dir: Option<PathBuf>,
    pub http_addr: String,
}

impl ServerConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            bin_provider_url: get("BIN_PROVIDER_URL"),
            documents_dir: get("OLDUBIL_DOCS_DIR").map(PathBuf::from),
            http_addr: get("MCP_HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string()),
        }
    }

    /// Validated provider base URL without a trailing slash.
    pub fn bin_provider_url(&self) -> Result<String, ConfigError> {
        let raw = self
            .bin_provider_url
            .as_deref()
            .unwrap_or(DEFAULT_BIN_PROVIDER_URL);
        validate_provider_url(raw)
    }

    /// Configured documents directory, else the executable's directory.
    pub fn documents_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.documents_dir {
            Some(dir) => Ok(dir.clone()),
            None => executable_dir(),
        }
    }
}

fn validate_provider_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidProviderUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Directory holding the running executable; PDFs ship next to the server.
fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::ExecutableDir)?;
    Ok(exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".")))
}
