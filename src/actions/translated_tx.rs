//! Transaction explanation.
//!
//! Handles queries like "what happened in 0x700d... on ethereum?".

use std::sync::Arc;

use async_trait::async_trait;

use crate::actions::{contains_any, format_timestamp};
use crate::extract::extract_blockchain_data;
use crate::provider::{TranslateApi, Transaction};
use crate::ratelimit::RateLimiter;
use crate::runtime::{Action, ActionExample, ActionResponse, Message, ResponseCallback};
use crate::validation::{SupportedChain, TxHash};

pub const ACTION_NAME: &str = "GET_TRANSLATED_TX";

const KEYWORDS: [&str; 5] = ["transaction", "happened", "understand", "explain", "details"];

const MISSING_PARAMS_MSG: &str = "I need a valid transaction hash and chain to explain the \
     transaction. Please provide a transaction hash like 0x... and specify the chain.";
const INVALID_INPUT_MSG: &str = "Invalid transaction hash or chain. Please provide a valid \
     transaction hash (0x...) and supported chain.";

pub struct TranslatedTxAction {
    provider: Arc<dyn TranslateApi>,
    rate_limiter: Arc<RateLimiter>,
}

impl TranslatedTxAction {
    pub fn new(provider: Arc<dyn TranslateApi>, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            provider,
            rate_limiter,
        }
    }
}

#[async_trait]
impl Action for TranslatedTxAction {
    fn name(&self) -> &'static str {
        ACTION_NAME
    }

    fn similes(&self) -> &'static [&'static str] {
        &["EXPLAIN_TRANSACTION", "TRANSACTION_DETAILS", "WHAT_HAPPENED"]
    }

    fn description(&self) -> &'static str {
        "Gets detailed human-readable information about a specific transaction"
    }

    fn validate(&self, message: &Message) -> bool {
        let lowered = message.text.to_lowercase();
        let data = extract_blockchain_data(&message.text);
        contains_any(&lowered, &KEYWORDS) && !data.tx_hashes.is_empty() && !data.chains.is_empty()
    }

    async fn handle(&self, message: &Message, callback: &ResponseCallback) {
        tracing::info!(action = ACTION_NAME, "handler started");
        let data = extract_blockchain_data(&message.text);
        tracing::info!(
            action = ACTION_NAME,
            tx_hashes = ?data.tx_hashes,
            chains = ?data.chains,
            "extracted blockchain data"
        );

        let (Some(tx_hash), Some(chain)) = (data.tx_hashes.first(), data.chains.first()) else {
            tracing::warn!(action = ACTION_NAME, "missing transaction hash or chain");
            callback(ActionResponse::plain(MISSING_PARAMS_MSG, message.source.clone()));
            return;
        };

        let (tx_hash, chain) = match (TxHash::parse(tx_hash), chain.parse::<SupportedChain>()) {
            (Ok(tx_hash), Ok(chain)) => (tx_hash, chain),
            (hash_result, chain_result) => {
                tracing::warn!(
                    action = ACTION_NAME,
                    tx_hash_valid = hash_result.is_ok(),
                    chain_valid = chain_result.is_ok(),
                    "validation failed"
                );
                callback(ActionResponse::plain(INVALID_INPUT_MSG, message.source.clone()));
                return;
            }
        };

        tracing::info!(action = ACTION_NAME, %tx_hash, %chain, "fetching transaction details");
        self.rate_limiter.acquire().await;

        match self.provider.get_translated_tx(chain, &tx_hash).await {
            Ok(None) => {
                tracing::warn!(action = ACTION_NAME, %tx_hash, %chain, "transaction not found");
                callback(ActionResponse::from_action(
                    ACTION_NAME,
                    format!("Transaction {tx_hash} not found on {chain}."),
                    message.source.clone(),
                ));
            }
            Ok(Some(tx)) => {
                tracing::info!(action = ACTION_NAME, "formatting response");
                callback(ActionResponse::from_action(
                    ACTION_NAME,
                    format_translated_tx(&tx_hash, chain, &tx),
                    message.source.clone(),
                ));
            }
            Err(err) => {
                tracing::error!(action = ACTION_NAME, error = %err, "provider call failed");
                callback(ActionResponse::plain(
                    format!("Sorry, I encountered an error while analyzing the transaction: {err}"),
                    message.source.clone(),
                ));
            }
        }
    }

    fn examples(&self) -> &'static [&'static [ActionExample]] {
        &[&[
            ActionExample {
                name: "User",
                text: "what happened in 0x700d06dc473f95530a0dfa04c1fe679aecd722d2a14e07170704fb7a8d2381f6 on ethereum?",
                actions: &[],
            },
            ActionExample {
                name: "Assistant",
                text: "🔍 **Transaction Analysis for 0x700d06dc473f95530a0dfa04c1fe679aecd722d2a14e07170704fb7a8d2381f6**\n\n📋 **Description:** Swapped 1.5 ETH for 3,240 USDC\n⏰ **Time:** 2024-12-13 14:30:45 UTC\n⛓️ **Chain:** ethereum",
                actions: &[ACTION_NAME],
            },
        ]]
    }
}

fn format_translated_tx(tx_hash: &TxHash, chain: SupportedChain, tx: &Transaction) -> String {
    let description = tx
        .classification_data
        .as_ref()
        .and_then(|c| c.description.as_deref())
        .unwrap_or("Unknown transaction");
    let timestamp = tx
        .raw_transaction_data
        .as_ref()
        .and_then(|raw| raw.timestamp)
        .map(format_timestamp)
        .unwrap_or_else(|| "N/A".to_string());

    let mut response = format!("🔍 **Transaction Analysis for {tx_hash}**\n\n");
    response.push_str(&format!("📋 **Description:** {description}\n"));
    response.push_str(&format!("⏰ **Time:** {timestamp}\n"));
    response.push_str(&format!("⛓️ **Chain:** {chain}\n"));

    if let Some(raw) = tx.raw_transaction_data.as_ref() {
        if let (Some(gas_used), Some(gas_price)) = (raw.gas_used, raw.gas_price) {
            let gas_cost = (gas_used as f64 * gas_price as f64) / 1e18;
            response.push_str(&format!("⛽ **Gas Cost:** {gas_cost:.6} ETH\n"));
        }
    }

    if let Some(tx_type) = tx
        .classification_data
        .as_ref()
        .and_then(|c| c.tx_type.as_deref())
    {
        response.push_str(&format!("🏷️ **Type:** {tx_type}\n"));
    }

    response
}
