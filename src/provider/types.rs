//! Wire types for the Noves Intents translate and pricing APIs.
//!
//! Every leaf field is optional: the API omits classification or raw data
//! for transactions it cannot interpret, and formatting degrades to
//! placeholders instead of failing.

use serde::{Deserialize, Serialize};

use crate::validation::{Address, SupportedChain};

/// A translated transaction as returned by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    pub classification_data: Option<ClassificationData>,
    pub raw_transaction_data: Option<RawTransactionData>,
}

/// Human-readable interpretation of a transaction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassificationData {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub tx_type: Option<String>,
}

/// Raw on-chain fields attached to a translated transaction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTransactionData {
    pub transaction_hash: Option<String>,
    /// Unix seconds.
    pub timestamp: Option<u64>,
    pub gas_used: Option<u64>,
    /// Wei.
    pub gas_price: Option<u64>,
}

/// Parameters for a token price lookup.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPriceParams {
    pub chain: SupportedChain,
    pub token_address: Address,
    /// Unix seconds; present only for historical lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

/// Price data for a token.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceInfo {
    pub price: Option<Price>,
    pub token: Option<TokenInfo>,
    pub priced_by: Option<PricedBy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Price {
    /// Decimal string, e.g. `"3245.67"`.
    pub amount: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenInfo {
    pub symbol: Option<String>,
    pub name: Option<String>,
}

/// How the price was derived.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricedBy {
    /// USD liquidity backing the quote.
    pub liquidity: Option<f64>,
    pub exchange: Option<Exchange>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Exchange {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_deserializes_from_camel_case() {
        let json = r#"{
            "classificationData": { "description": "Swapped ETH for USDC", "type": "swap" },
            "rawTransactionData": {
                "transactionHash": "0x700d06dc473f95530a0dfa04c1fe679aecd722d2a14e07170704fb7a8d2381f6",
                "timestamp": 1734100245,
                "gasUsed": 21000,
                "gasPrice": 20000000000
            }
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        let classification = tx.classification_data.unwrap();
        assert_eq!(classification.description.as_deref(), Some("Swapped ETH for USDC"));
        assert_eq!(classification.tx_type.as_deref(), Some("swap"));
        let raw = tx.raw_transaction_data.unwrap();
        assert_eq!(raw.timestamp, Some(1734100245));
        assert_eq!(raw.gas_used, Some(21000));
    }

    #[test]
    fn test_missing_fields_deserialize_to_none() {
        let tx: Transaction = serde_json::from_str("{}").unwrap();
        assert!(tx.classification_data.is_none());
        assert!(tx.raw_transaction_data.is_none());

        let price: PriceInfo = serde_json::from_str(r#"{ "price": {} }"#).unwrap();
        let amount = price.price.unwrap();
        assert!(amount.amount.is_none());
        assert!(amount.currency.is_none());
    }

    #[test]
    fn test_price_info_full_shape() {
        let json = r#"{
            "price": { "amount": "3245.67", "currency": "USD" },
            "token": { "symbol": "stETH", "name": "Lido Staked ETH" },
            "pricedBy": { "liquidity": 1250000.5, "exchange": { "name": "Curve" } }
        }"#;
        let info: PriceInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.price.unwrap().amount.as_deref(), Some("3245.67"));
        assert_eq!(info.token.unwrap().symbol.as_deref(), Some("stETH"));
        let priced_by = info.priced_by.unwrap();
        assert_eq!(priced_by.liquidity, Some(1250000.5));
        assert_eq!(priced_by.exchange.unwrap().name.as_deref(), Some("Curve"));
    }

    #[test]
    fn test_token_price_params_omit_absent_timestamp() {
        let params = TokenPriceParams {
            chain: SupportedChain::Ethereum,
            token_address: Address::parse("0xae7ab96520de3a18e5e111b5eaab095312d7fe84").unwrap(),
            timestamp: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("timestamp").is_none());
        assert_eq!(json["chain"], "ethereum");
    }
}
