//! Shared test doubles: a canned provider and a callback recorder.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use noves_plugin::provider::types::{
    ClassificationData, Price, PriceInfo, RawTransactionData, TokenPriceParams, Transaction,
};
use noves_plugin::provider::{ProviderError, ProviderResult, TranslateApi};
use noves_plugin::runtime::ActionResponse;
use noves_plugin::validation::{Address, SupportedChain, TxHash};

/// Provider double returning canned data, with optional failure injection.
#[derive(Default)]
pub struct StubProvider {
    pub txs: Vec<Transaction>,
    pub translated: Option<Transaction>,
    pub price: Option<PriceInfo>,
    pub fail: bool,
}

impl StubProvider {
    fn check_failure<T>(&self, ok: T) -> ProviderResult<T> {
        if self.fail {
            Err(ProviderError::BaseUrl("stub failure".to_string()))
        } else {
            Ok(ok)
        }
    }
}

#[async_trait]
impl TranslateApi for StubProvider {
    async fn get_recent_txs(
        &self,
        _chain: SupportedChain,
        _address: &Address,
    ) -> ProviderResult<Vec<Transaction>> {
        self.check_failure(self.txs.clone())
    }

    async fn get_translated_tx(
        &self,
        _chain: SupportedChain,
        _tx_hash: &TxHash,
    ) -> ProviderResult<Option<Transaction>> {
        self.check_failure(self.translated.clone())
    }

    async fn get_token_price(
        &self,
        _params: TokenPriceParams,
    ) -> ProviderResult<Option<PriceInfo>> {
        self.check_failure(self.price.clone())
    }
}

/// A sample translated transaction with all optional fields populated.
#[allow(dead_code)]
pub fn sample_tx(description: &str) -> Transaction {
    Transaction {
        classification_data: Some(ClassificationData {
            description: Some(description.to_string()),
            tx_type: Some("swap".to_string()),
        }),
        raw_transaction_data: Some(RawTransactionData {
            transaction_hash: Some(
                "0x700d06dc473f95530a0dfa04c1fe679aecd722d2a14e07170704fb7a8d2381f6".to_string(),
            ),
            timestamp: Some(1_734_100_245),
            gas_used: Some(21_000),
            gas_price: Some(20_000_000_000),
        }),
    }
}

/// A sample price answer with the fields the formatter reads.
#[allow(dead_code)]
pub fn sample_price(amount: &str) -> PriceInfo {
    PriceInfo {
        price: Some(Price {
            amount: Some(amount.to_string()),
            currency: Some("USD".to_string()),
        }),
        token: None,
        priced_by: None,
    }
}

/// Collects every response a handler sends through its callback.
#[derive(Clone, Default)]
pub struct CallbackRecorder {
    responses: Arc<Mutex<Vec<ActionResponse>>>,
}

impl CallbackRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The callback to hand to `Action::handle`.
    pub fn callback(&self) -> impl Fn(ActionResponse) + Send + Sync {
        let responses = self.responses.clone();
        move |response| {
            responses.lock().expect("recorder mutex poisoned").push(response);
        }
    }

    pub fn responses(&self) -> Vec<ActionResponse> {
        self.responses.lock().expect("recorder mutex poisoned").clone()
    }

    /// Panics unless the handler called back exactly once.
    pub fn single_response(&self) -> ActionResponse {
        let responses = self.responses();
        assert_eq!(responses.len(), 1, "expected exactly one callback invocation");
        responses.into_iter().next().expect("checked length above")
    }
}
