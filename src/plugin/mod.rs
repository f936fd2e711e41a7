//! Plugin assembly.
//!
//! The composition root: constructs the shared rate limiter and provider
//! client, wires them into the three actions, and exposes the list the host
//! runtime registers.

use std::sync::Arc;

use crate::actions::{RecentTxsAction, TokenPriceAction, TranslatedTxAction};
use crate::provider::{IntentProvider, ProviderResult, TranslateApi};
use crate::ratelimit::RateLimiter;
use crate::runtime::Action;

pub const PLUGIN_NAME: &str = "plugin-noves";
pub const PLUGIN_DESCRIPTION: &str = "Agent plugin for blockchain data using Noves Intents";

/// The assembled plugin: three actions sharing one rate limiter and one
/// provider client.
pub struct NovesPlugin {
    actions: Vec<Arc<dyn Action>>,
    rate_limiter: Arc<RateLimiter>,
}

impl NovesPlugin {
    /// Wire the actions against the public Noves endpoint.
    pub fn new() -> ProviderResult<Self> {
        Ok(Self::with_provider(
            Arc::new(IntentProvider::new()?),
            Arc::new(RateLimiter::default()),
        ))
    }

    /// Wire the actions against an explicit provider and rate limiter.
    /// Registration order is recent-txs, translated-tx, token-price; a host
    /// with a first-match policy sees them in that order.
    pub fn with_provider(provider: Arc<dyn TranslateApi>, rate_limiter: Arc<RateLimiter>) -> Self {
        let actions: Vec<Arc<dyn Action>> = vec![
            Arc::new(RecentTxsAction::new(provider.clone(), rate_limiter.clone())),
            Arc::new(TranslatedTxAction::new(provider.clone(), rate_limiter.clone())),
            Arc::new(TokenPriceAction::new(provider, rate_limiter.clone())),
        ];
        Self {
            actions,
            rate_limiter,
        }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn description(&self) -> &'static str {
        PLUGIN_DESCRIPTION
    }

    /// Actions in registration order.
    pub fn actions(&self) -> &[Arc<dyn Action>] {
        &self.actions
    }

    /// Look up an action by its registered name.
    pub fn action(&self, name: &str) -> Option<&Arc<dyn Action>> {
        self.actions.iter().find(|action| action.name() == name)
    }

    /// Log the startup banner. The plugin needs no credentials or external
    /// configuration, so there is nothing else to initialize.
    pub fn init(&self) {
        tracing::info!("🚀 Noves blockchain plugin initialized successfully!");
        let names: Vec<&str> = self.actions.iter().map(|action| action.name()).collect();
        tracing::info!("✅ Available actions: {}", names.join(", "));
        tracing::info!(
            "⚡ Rate limiting: {} requests/minute, {}-second intervals",
            self.rate_limiter.max_requests(),
            self.rate_limiter.min_interval().as_secs()
        );
    }
}
