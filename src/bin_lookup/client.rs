//! HTTP client for the binlist metadata API.
//!
//! Calls `GET {base}/{bin}` with the `Accept-Version: 3` pin the provider
//! requires. The response body is passed through untouched.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::bin_lookup::validation::is_exact_bin;
use crate::config::{ConfigError, ServerConfig};

pub const ACCEPT_VERSION_HEADER: &str = "Accept-Version";
pub const ACCEPT_VERSION: &str = "3";

/// Lookup failures. The display text is what the model sees.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Input must be exactly 6 digits. Please enter only the BIN, not the full card number.")]
    InvalidBin,
    #[error("No card found for BIN: {0}")]
    NotFound(String),
    /// Non-404 status, network failure or undecodable body.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct BinListClient {
    client: Client,
    base_url: String,
}

impl BinListClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.bin_provider_url()?))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up card metadata for a 6-digit BIN.
    ///
    /// Malformed input is rejected before any request is made. Every call hits
    /// the provider; nothing is cached or retried.
    pub async fn lookup_card(&self, bin: &str) -> Result<Value, LookupError> {
        if !is_exact_bin(bin) {
            return Err(LookupError::InvalidBin);
        }

        let url = format!("{}/{}", self.base_url, bin);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT_VERSION_HEADER, ACCEPT_VERSION)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(bin.to_string()));
        }

        let body = response.error_for_status()?.json::<Value>().await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BinListClient::new("https://lookup.binlist.net/");
        assert_eq!(client.base_url(), "https://lookup.binlist.net");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LookupError::InvalidBin.to_string(),
            "Input must be exactly 6 digits. Please enter only the BIN, not the full card number."
        );
        assert_eq!(
            LookupError::NotFound("999999".to_string()).to_string(),
            "No card found for BIN: 999999"
        );
    }

    #[actix_web::test]
    async fn test_invalid_bin_short_circuits() {
        // Unroutable base URL: a request would fail with a transport error.
        let client = BinListClient::new("http://invalid.invalid");
        for input in ["12345", "1234567", "12a456", ""] {
            let err = client.lookup_card(input).await.unwrap_err();
            assert!(matches!(err, LookupError::InvalidBin), "{input:?}");
        }
    }
}
