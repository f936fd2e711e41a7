//! Strongly-typed validation of extracted blockchain identifiers.
//!
//! Extraction ([`crate::extract`]) is deliberately loose; everything that
//! reaches a provider call goes through the parses here first. Parsing is
//! the only way to construct these types, so holding one is proof the
//! underlying string is well-formed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for inputs that fail format or membership checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Not `0x` followed by exactly 40 hex characters.
    #[error("invalid address: expected 0x followed by exactly 40 hex characters")]
    InvalidAddress,

    /// Not `0x` followed by exactly 64 hex characters.
    #[error("invalid transaction hash: expected 0x followed by exactly 64 hex characters")]
    InvalidTxHash,

    /// Chain name outside the supported set.
    #[error("unsupported chain: {0}")]
    UnsupportedChain(String),
}

/// A wallet or token contract address, `0x` + 40 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parse with full-string anchoring; no substring tolerance.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if is_prefixed_hex(s, 40) {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationError::InvalidAddress)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transaction hash, `0x` + 64 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if is_prefixed_hex(s, 64) {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationError::InvalidTxHash)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_prefixed_hex(s: &str, digits: usize) -> bool {
    match s.strip_prefix("0x") {
        Some(hex) => hex.len() == digits && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// The closed set of chains the provider can answer for.
///
/// Matching is case-sensitive: extraction already lower-cases and resolves
/// aliases, and this type does not re-normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedChain {
    Ethereum,
    Polygon,
    Base,
    Arbitrum,
    Optimism,
    Bsc,
}

impl SupportedChain {
    pub const ALL: [SupportedChain; 6] = [
        SupportedChain::Ethereum,
        SupportedChain::Polygon,
        SupportedChain::Base,
        SupportedChain::Arbitrum,
        SupportedChain::Optimism,
        SupportedChain::Bsc,
    ];

    /// Canonical lower-case name, as used in provider URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedChain::Ethereum => "ethereum",
            SupportedChain::Polygon => "polygon",
            SupportedChain::Base => "base",
            SupportedChain::Arbitrum => "arbitrum",
            SupportedChain::Optimism => "optimism",
            SupportedChain::Bsc => "bsc",
        }
    }
}

impl FromStr for SupportedChain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ethereum" => Ok(SupportedChain::Ethereum),
            "polygon" => Ok(SupportedChain::Polygon),
            "base" => Ok(SupportedChain::Base),
            "arbitrum" => Ok(SupportedChain::Arbitrum),
            "optimism" => Ok(SupportedChain::Optimism),
            "bsc" => Ok(SupportedChain::Bsc),
            other => Err(ValidationError::UnsupportedChain(other.to_string())),
        }
    }
}

impl fmt::Display for SupportedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
