//! Exchange gateway factory.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::coinbase::{self, CoinbaseGateway, CoinbaseSigner};
use crate::adapter::outbound::gemini::{self, GeminiGateway, GeminiSigner};
use crate::error::Result;
use crate::infrastructure::config::exchange::{ExchangeConfig, ExchangeKind};
use crate::port::outbound::exchange::ExchangeGateway;

/// Base URL for the configured exchange and environment.
#[must_use]
pub fn exchange_base_url(config: &ExchangeConfig, sandbox: bool) -> String {
    if let Some(url) = &config.base_url {
        return url.clone();
    }
    let url = match (config.kind, sandbox) {
        (ExchangeKind::Gemini, false) => gemini::client::PRODUCTION_URL,
        (ExchangeKind::Gemini, true) => gemini::client::SANDBOX_URL,
        (ExchangeKind::Coinbase, false) => coinbase::client::PRODUCTION_URL,
        (ExchangeKind::Coinbase, true) => coinbase::client::SANDBOX_URL,
    };
    url.to_string()
}

/// Build the gateway selected by `[exchange] type`.
///
/// `sandbox` selects the exchange's test environment unless `base_url` is set.
pub fn build_gateway(config: &ExchangeConfig, sandbox: bool) -> Result<Arc<dyn ExchangeGateway>> {
    let http = config.http_settings();
    let url = exchange_base_url(config, sandbox);
    info!(exchange = %config.kind, url = %url, sandbox, "Exchange gateway configured");

    let gateway: Arc<dyn ExchangeGateway> = match config.kind {
        ExchangeKind::Gemini => {
            let signer = GeminiSigner::new(config.api_key(), config.api_secret());
            Arc::new(GeminiGateway::new(url, signer, &http))
        }
        ExchangeKind::Coinbase => {
            let signer =
                CoinbaseSigner::new(config.api_key(), config.api_secret(), config.passphrase())?;
            Arc::new(CoinbaseGateway::new(url, signer, &http))
        }
    };
    Ok(gateway)
}
