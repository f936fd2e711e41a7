//! Token price lookups, current or historical.
//!
//! Handles queries like "what is the price of the 0xae7a... token on ethereum?".

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::actions::{contains_any, format_timestamp};
use crate::extract::extract_blockchain_data;
use crate::provider::{PriceInfo, TokenPriceParams, TranslateApi};
use crate::ratelimit::RateLimiter;
use crate::runtime::{Action, ActionExample, ActionResponse, Message, ResponseCallback};
use crate::validation::{Address, SupportedChain};

pub const ACTION_NAME: &str = "GET_TOKEN_PRICE";

const KEYWORDS: [&str; 5] = ["price", "value", "cost", "worth", "usd"];

/// Words that flag a historical rather than current price request.
const HISTORICAL_KEYWORDS: [&str; 5] = ["ago", "was", "month", "week", "day"];

/// Historical requests are resolved to a fixed point 30 days back.
const THIRTY_DAYS_SECS: u64 = 30 * 24 * 60 * 60;

const MISSING_PARAMS_MSG: &str = "I need a valid token address and chain to check the price. \
     Please provide a token address like 0x... and specify the chain.";
const INVALID_INPUT_MSG: &str =
    "Invalid token address or chain. Please provide a valid token address and supported chain.";

pub struct TokenPriceAction {
    provider: Arc<dyn TranslateApi>,
    rate_limiter: Arc<RateLimiter>,
}

impl TokenPriceAction {
    pub fn new(provider: Arc<dyn TranslateApi>, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            provider,
            rate_limiter,
        }
    }
}

#[async_trait]
impl Action for TokenPriceAction {
    fn name(&self) -> &'static str {
        ACTION_NAME
    }

    fn similes(&self) -> &'static [&'static str] {
        &["TOKEN_PRICE", "PRICE_CHECK", "TOKEN_VALUE"]
    }

    fn description(&self) -> &'static str {
        "Gets current or historical price information for a token"
    }

    fn validate(&self, message: &Message) -> bool {
        let lowered = message.text.to_lowercase();
        let data = extract_blockchain_data(&message.text);
        contains_any(&lowered, &KEYWORDS) && !data.addresses.is_empty() && !data.chains.is_empty()
    }

    async fn handle(&self, message: &Message, callback: &ResponseCallback) {
        tracing::info!(action = ACTION_NAME, "handler started");
        let data = extract_blockchain_data(&message.text);
        let lowered = message.text.to_lowercase();

        let (Some(address), Some(chain)) = (data.addresses.first(), data.chains.first()) else {
            tracing::warn!(action = ACTION_NAME, "missing token address or chain");
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

        let timestamp = contains_any(&lowered, &HISTORICAL_KEYWORDS).then(historical_timestamp);
        tracing::info!(
            action = ACTION_NAME,
            %address,
            %chain,
            historical = timestamp.is_some(),
            "fetching token price"
        );

        self.rate_limiter.acquire().await;

        let params = TokenPriceParams {
            chain,
            token_address: address.clone(),
            timestamp,
        };

        match self.provider.get_token_price(params).await {
            Ok(price_info) => match price_info.filter(|info| info.price.is_some()) {
                Some(info) => {
                    tracing::info!(action = ACTION_NAME, "formatting response");
                    callback(ActionResponse::from_action(
                        ACTION_NAME,
                        format_token_price(&address, chain, &info, timestamp),
                        message.source.clone(),
                    ));
                }
                None => {
                    tracing::warn!(action = ACTION_NAME, %address, %chain, "no price data");
                    callback(ActionResponse::from_action(
                        ACTION_NAME,
                        format!("Price data not available for token {address} on {chain}."),
                        message.source.clone(),
                    ));
                }
            },
            Err(err) => {
                tracing::error!(action = ACTION_NAME, error = %err, "provider call failed");
                callback(ActionResponse::plain(
                    format!("Sorry, I encountered an error while fetching token price: {err}"),
                    message.source.clone(),
                ));
            }
        }
    }

    fn examples(&self) -> &'static [&'static [ActionExample]] {
        &[&[
            ActionExample {
                name: "User",
                text: "what is the price of the 0xae7ab96520de3a18e5e111b5eaab095312d7fe84 token on ethereum?",
                actions: &[],
            },
            ActionExample {
                name: "Assistant",
                text: "💰 **Token Price Information**\n\n🏷️ **Token:** Lido Staked ETH (stETH)\n📍 **Address:** 0xae7ab96520de3a18e5e111b5eaab095312d7fe84\n⛓️ **Chain:** ethereum\n💵 **Price:** $3245.67 USD",
                actions: &[ACTION_NAME],
            },
        ]]
    }
}

fn historical_timestamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    now.saturating_sub(THIRTY_DAYS_SECS)
}

fn format_token_price(
    address: &Address,
    chain: SupportedChain,
    info: &PriceInfo,
    timestamp: Option<u64>,
) -> String {
    let price = info.price.as_ref();
    let amount = price.and_then(|p| p.amount.as_deref()).unwrap_or("N/A");
    let currency = price.and_then(|p| p.currency.as_deref()).unwrap_or("USD");
    let symbol = info
        .token
        .as_ref()
        .and_then(|t| t.symbol.as_deref())
        .unwrap_or("Unknown Token");
    let name = info
        .token
        .as_ref()
        .and_then(|t| t.name.as_deref())
        .unwrap_or_else(|| address.as_str());

    let mut response = String::from("💰 **Token Price Information**\n\n");
    response.push_str(&format!("🏷️ **Token:** {name} ({symbol})\n"));
    response.push_str(&format!("📍 **Address:** {address}\n"));
    response.push_str(&format!("⛓️ **Chain:** {chain}\n"));
    response.push_str(&format!("💵 **Price:** ${amount} {currency}\n"));

    match timestamp {
        Some(ts) => response.push_str(&format!("📅 **Date:** {} (Historical)\n", format_timestamp(ts))),
        None => response.push_str("⏰ **Updated:** Just now (Current)\n"),
    }

    if let Some(priced_by) = info.priced_by.as_ref() {
        if let Some(liquidity) = priced_by.liquidity {
            response.push_str(&format!("💧 **Liquidity:** ${liquidity:.2}\n"));
        }
        if let Some(exchange) = priced_by.exchange.as_ref().and_then(|e| e.name.as_deref()) {
            response.push_str(&format!("🏪 **Exchange:** {exchange}\n"));
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::types::{Exchange, Price, PricedBy, TokenInfo};

    const TOKEN: &str = "0xae7ab96520de3a18e5e111b5eaab095312d7fe84";

    fn steth_price() -> PriceInfo {
        PriceInfo {
            price: Some(Price {
                amount: Some("3245.67".to_string()),
                currency: Some("USD".to_string()),
            }),
            token: Some(TokenInfo {
                symbol: Some("stETH".to_string()),
                name: Some("Lido Staked ETH".to_string()),
            }),
            priced_by: Some(PricedBy {
                liquidity: Some(1_250_000.5),
                exchange: Some(Exchange {
                    name: Some("Curve".to_string()),
                }),
            }),
        }
    }

    #[test]
    fn test_format_current_price() {
        let address = Address::parse(TOKEN).unwrap();
        let formatted =
            format_token_price(&address, SupportedChain::Ethereum, &steth_price(), None);
        assert!(formatted.contains("🏷️ **Token:** Lido Staked ETH (stETH)"));
        assert!(formatted.contains("💵 **Price:** $3245.67 USD"));
        assert!(formatted.contains("⏰ **Updated:** Just now (Current)"));
        assert!(formatted.contains("💧 **Liquidity:** $1250000.50"));
        assert!(formatted.contains("🏪 **Exchange:** Curve"));
    }

    #[test]
    fn test_format_historical_price_shows_date_line() {
        let address = Address::parse(TOKEN).unwrap();
        let formatted = format_token_price(
            &address,
            SupportedChain::Ethereum,
            &steth_price(),
            Some(1734100245),
        );
        assert!(formatted.contains("📅 **Date:** 2024-12-13 14:30:45 UTC (Historical)"));
        assert!(!formatted.contains("Just now"));
    }

    #[test]
    fn test_format_degrades_missing_token_metadata() {
        let address = Address::parse(TOKEN).unwrap();
        let info = PriceInfo {
            price: Some(Price {
                amount: Some("1.00".to_string()),
                currency: None,
            }),
            token: None,
            priced_by: None,
        };
        let formatted = format_token_price(&address, SupportedChain::Bsc, &info, None);
        assert!(formatted.contains(&format!("🏷️ **Token:** {TOKEN} (Unknown Token)")));
        assert!(formatted.contains("💵 **Price:** $1.00 USD"));
        assert!(!formatted.contains("Liquidity"));
        assert!(!formatted.contains("Exchange"));
    }

    #[test]
    fn test_historical_timestamp_is_thirty_days_back() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let ts = historical_timestamp();
        assert!(now - ts >= THIRTY_DAYS_SECS);
        assert!(now - ts < THIRTY_DAYS_SECS + 5);
    }
}
