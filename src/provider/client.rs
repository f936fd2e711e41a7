//! HTTP client for the Noves Intents API.
//!
//! # Responsibilities
//! - Issue translate and pricing requests over HTTPS
//! - Map 404s to "absent" rather than errors
//! - Bound every request with a timeout
//!
//! The API needs no credentials; the only configuration is the base URL,
//! which tests and self-hosted gateways can override.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::provider::types::{PriceInfo, TokenPriceParams, Transaction};
use crate::validation::{Address, SupportedChain, TxHash};

/// Public Noves translate endpoint.
pub const DEFAULT_BASE_URL: &str = "https://translate.noves.fi";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the provider client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network failure, timeout, non-success status, or undecodable body.
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL is unusable.
    #[error("invalid provider base URL: {0}")]
    BaseUrl(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// The provider operations the actions depend on.
///
/// A trait seam so handler tests can substitute a canned provider for the
/// real HTTP client.
#[async_trait]
pub trait TranslateApi: Send + Sync {
    /// Recent translated transactions for a wallet, newest first.
    async fn get_recent_txs(
        &self,
        chain: SupportedChain,
        address: &Address,
    ) -> ProviderResult<Vec<Transaction>>;

    /// A single translated transaction, or `None` if the chain has no
    /// record of the hash.
    async fn get_translated_tx(
        &self,
        chain: SupportedChain,
        tx_hash: &TxHash,
    ) -> ProviderResult<Option<Transaction>>;

    /// Current or historical token price, or `None` if the token is not
    /// priced on that chain.
    async fn get_token_price(&self, params: TokenPriceParams) -> ProviderResult<Option<PriceInfo>>;
}

/// reqwest-backed [`TranslateApi`] implementation.
#[derive(Debug, Clone)]
pub struct IntentProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl IntentProvider {
    /// Client against the public Noves endpoint.
    pub fn new() -> ProviderResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> ProviderResult<Self> {
        let base_url: Url = base_url
            .parse()
            .map_err(|e| ProviderError::BaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::BaseUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL validated at construction")
            .pop_if_empty()
            .extend(segments);
        url
    }
}

#[async_trait]
impl TranslateApi for IntentProvider {
    async fn get_recent_txs(
        &self,
        chain: SupportedChain,
        address: &Address,
    ) -> ProviderResult<Vec<Transaction>> {
        let url = self.endpoint(&["evm", chain.as_str(), "txs", address.as_str()]);
        tracing::debug!(%url, "fetching recent transactions");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn get_translated_tx(
        &self,
        chain: SupportedChain,
        tx_hash: &TxHash,
    ) -> ProviderResult<Option<Transaction>> {
        let url = self.endpoint(&["evm", chain.as_str(), "tx", tx_hash.as_str()]);
        tracing::debug!(%url, "fetching translated transaction");
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.json().await?))
    }

    async fn get_token_price(&self, params: TokenPriceParams) -> ProviderResult<Option<PriceInfo>> {
        let mut url = self.endpoint(&[
            "evm",
            params.chain.as_str(),
            "price",
            params.token_address.as_str(),
        ]);
        if let Some(timestamp) = params.timestamp {
            url.query_pairs_mut()
                .append_pair("timestamp", &timestamp.to_string());
        }
        tracing::debug!(%url, "fetching token price");
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.json().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(IntentProvider::with_base_url("not a url").is_err());
        assert!(IntentProvider::with_base_url("mailto:ops@example.com").is_err());
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let provider = IntentProvider::with_base_url("https://translate.example").unwrap();
        let url = provider.endpoint(&["evm", "ethereum", "tx", "0xabc"]);
        assert_eq!(url.as_str(), "https://translate.example/evm/ethereum/tx/0xabc");
    }

    #[test]
    fn test_default_base_url_is_valid() {
        assert!(IntentProvider::new().is_ok());
    }
}
