//! Agent plugin answering blockchain queries through the Noves Intents API.
//!
//! Free-text messages are scanned for addresses, transaction hashes, and
//! chain names; validated candidates are forwarded to the external provider
//! behind a shared rate limiter, and results come back as human-readable
//! responses through the host runtime's callback.

pub mod actions;
pub mod extract;
pub mod observability;
pub mod plugin;
pub mod provider;
pub mod ratelimit;
pub mod runtime;
pub mod validation;

pub use extract::{extract_blockchain_data, ExtractedData};
pub use plugin::NovesPlugin;
pub use provider::{IntentProvider, TranslateApi};
pub use ratelimit::RateLimiter;
pub use runtime::{Action, ActionResponse, Message};
pub use validation::{Address, SupportedChain, TxHash};
