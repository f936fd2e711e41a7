//! Recent wallet activity.
//!
//! Handles queries like "what was the activity of 0x6257... on ethereum?".

use std::sync::Arc;

use async_trait::async_trait;

use crate::actions::{contains_any, format_timestamp};
use crate::extract::extract_blockchain_data;
use crate::provider::{TranslateApi, Transaction};
use crate::ratelimit::RateLimiter;
use crate::runtime::{Action, ActionExample, ActionResponse, Message, ResponseCallback};
use crate::validation::{Address, SupportedChain};

pub const ACTION_NAME: &str = "GET_RECENT_TXS";

const KEYWORDS: [&str; 6] = ["activity", "transactions", "recent", "history", "wallet", "happened"];

/// How many transactions the reply lists before summarizing the rest.
const MAX_SHOWN_TXS: usize = 5;

const MISSING_PARAMS_MSG: &str = "I need a valid wallet address and chain to check recent \
     transactions. Please provide an address like 0x... and specify the chain (ethereum, \
     polygon, etc.)";
const INVALID_INPUT_MSG: &str = "Invalid address or chain. Please provide a valid Ethereum \
     address (0x...) and supported chain (ethereum, polygon, base, arbitrum, optimism, bsc).";

pub struct RecentTxsAction {
    provider: Arc<dyn TranslateApi>,
    rate_limiter: Arc<RateLimiter>,
}

impl RecentTxsAction {
    pub fn new(provider: Arc<dyn TranslateApi>, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            provider,
            rate_limiter,
        }
    }
}

#[async_trait]
impl Action for RecentTxsAction {
    fn name(&self) -> &'static str {
        ACTION_NAME
    }

    fn similes(&self) -> &'static [&'static str] {
        &["WALLET_ACTIVITY", "RECENT_TRANSACTIONS", "WALLET_HISTORY"]
    }

    fn description(&self) -> &'static str {
        "Gets recent transactions for a wallet address with human-readable descriptions"
    }

    fn validate(&self, message: &Message) -> bool {
        let lowered = message.text.to_lowercase();
        let data = extract_blockchain_data(&message.text);
        contains_any(&lowered, &KEYWORDS) && !data.addresses.is_empty() && !data.chains.is_empty()
    }

    async fn handle(&self, message: &Message, callback: &ResponseCallback) {
        tracing::info!(action = ACTION_NAME, "handler started");
        let data = extract_blockchain_data(&message.text);
        tracing::info!(
            action = ACTION_NAME,
            addresses = ?data.addresses,
            chains = ?data.chains,
            "extracted blockchain data"
        );

        let (Some(address), Some(chain)) = (data.addresses.first(), data.chains.first()) else {
            tracing::warn!(action = ACTION_NAME, "missing address or chain");
            callback(ActionResponse::plain(MISSING_PARAMS_MSG, message.source.clone()));
            return;
        };

        let (address, chain) = match (Address::parse(address), chain.parse::<SupportedChain>()) {
            (Ok(address), Ok(chain)) => (address, chain),
            (address_result, chain_result) => {
                tracing::warn!(
                    action = ACTION_NAME,
                    address_valid = address_result.is_ok(),
                    chain_valid = chain_result.is_ok(),
                    "validation failed"
                );
                callback(ActionResponse::plain(INVALID_INPUT_MSG, message.source.clone()));
                return;
            }
        };

        tracing::info!(action = ACTION_NAME, %address, %chain, "fetching recent transactions");
        self.rate_limiter.acquire().await;

        match self.provider.get_recent_txs(chain, &address).await {
            Ok(txs) if txs.is_empty() => {
                tracing::warn!(action = ACTION_NAME, %address, %chain, "no transactions found");
                callback(ActionResponse::from_action(
                    ACTION_NAME,
                    format!("No recent transactions found for {address} on {chain}."),
                    message.source.clone(),
                ));
            }
            Ok(txs) => {
                tracing::info!(action = ACTION_NAME, count = txs.len(), "formatting response");
                callback(ActionResponse::from_action(
                    ACTION_NAME,
                    format_recent_txs(&address, chain, &txs),
                    message.source.clone(),
                ));
            }
            Err(err) => {
                tracing::error!(action = ACTION_NAME, error = %err, "provider call failed");
                callback(ActionResponse::plain(
                    format!(
                        "Sorry, I encountered an error while fetching recent transactions for \
                         {address} on {chain}. This could be due to API rate limiting or network \
                         issues. Error: {err}"
                    ),
                    message.source.clone(),
                ));
            }
        }
    }

    fn examples(&self) -> &'static [&'static [ActionExample]] {
        &[&[
            ActionExample {
                name: "User",
                text: "what was the activity of 0x625758C705bf970375fF780f3544C1ddc8eeb6Ab on ethereum?",
                actions: &[],
            },
            ActionExample {
                name: "Assistant",
                text: "🔍 **Recent activity for 0x625758C705bf970375fF780f3544C1ddc8eeb6Ab on ethereum:**\n\n1. **Swapped ETH for USDC**\n   • Hash: 0x12345678...\n   • Time: 2024-12-13 14:30:45 UTC",
                actions: &[ACTION_NAME],
            },
        ]]
    }
}

fn format_recent_txs(address: &Address, chain: SupportedChain, txs: &[Transaction]) -> String {
    let mut response = format!("🔍 **Recent activity for {address} on {chain}:**\n\n");

    for (index, tx) in txs.iter().take(MAX_SHOWN_TXS).enumerate() {
        let description = tx
            .classification_data
            .as_ref()
            .and_then(|c| c.description.as_deref())
            .unwrap_or("Unknown transaction");
        let hash = tx
            .raw_transaction_data
            .as_ref()
            .and_then(|raw| raw.transaction_hash.as_deref())
            .map(short_hash)
            .unwrap_or_else(|| "N/A".to_string());
        let timestamp = tx
            .raw_transaction_data
            .as_ref()
            .and_then(|raw| raw.timestamp)
            .map(format_timestamp)
            .unwrap_or_else(|| "N/A".to_string());

        response.push_str(&format!("{}. **{description}**\n", index + 1));
        response.push_str(&format!("   • Hash: {hash}\n"));
        response.push_str(&format!("   • Time: {timestamp}\n\n"));
    }

    if txs.len() > MAX_SHOWN_TXS {
        response.push_str(&format!(
            "... and {} more transactions.",
            txs.len() - MAX_SHOWN_TXS
        ));
    }

    response
}

fn short_hash(hash: &str) -> String {
    match hash.get(..10) {
        Some(prefix) => format!("{prefix}..."),
        None => hash.to_string(),
    }
}
