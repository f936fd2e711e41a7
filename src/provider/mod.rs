//! External blockchain-data provider integration.
//!
//! # Data Flow
//! ```text
//! Action handler:
//!     → ratelimit (acquire before any network I/O)
//!     → client.rs (TranslateApi trait, reqwest implementation)
//!     → types.rs (wire shapes, all-optional leaves)
//! ```
//!
//! # Design Decisions
//! - Actions depend on the `TranslateApi` trait, never on reqwest directly
//! - Absent results are `Ok(None)`, not errors
//! - No retries here; pacing is the rate limiter's job

pub mod client;
pub mod types;

pub use client::{IntentProvider, ProviderError, ProviderResult, TranslateApi, DEFAULT_BASE_URL};
pub use types::{PriceInfo, TokenPriceParams, Transaction};
