//! The three intent-handling actions exposed to the host runtime.
//!
//! # Data Flow
//! ```text
//! Host message:
//!     → validate() (keyword check + extraction, pure)
//!     → handle():
//!         extract → first address/hash + chain → validation parses
//!         → ratelimit.acquire() → provider call → format → callback
//! ```
//!
//! # Design Decisions
//! - Handlers re-extract rather than reusing validation's result; the two
//!   phases are invoked independently by the host
//! - Every handler path, including every failure, calls the callback
//!   exactly once and returns normally

pub mod recent_txs;
pub mod token_price;
pub mod translated_tx;

pub use recent_txs::RecentTxsAction;
pub use token_price::TokenPriceAction;
pub use translated_tx::TranslatedTxAction;

use chrono::DateTime;

/// Substring keyword check over already-lowercased text.
pub(crate) fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

/// Unix seconds to a human-readable UTC string, `N/A` when out of range.
pub(crate) fn format_timestamp(secs: u64) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
