//! HTTP client for a wallet signing bridge.

use super::payload::{EntryFunctionPayload, SubmitRequest, SubmitResponse};
use super::{ChainError, ChainErrorKind, ChainNotifier, TxHandle};
use crate::config::ChainConfig;
use bitcoin_toe_game::Persona;
use tracing::{debug, error, info, instrument};

/// Submits entry-function payloads through a wallet that signs on the
/// player's behalf.
#[derive(Debug, Clone)]
pub struct WalletNotifier {
    config: ChainConfig,
    client: reqwest::Client,
}

impl WalletNotifier {
    /// Creates a notifier for the configured bridge.
    #[instrument(skip(config), fields(wallet_url = %config.wallet_url(), network = %config.network()))]
    pub fn new(config: ChainConfig) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        info!("Wallet notifier ready");
        Ok(Self { config, client })
    }

    fn submit_url(&self) -> String {
        format!(
            "{}/v1/sign_and_submit",
            self.config.wallet_url().trim_end_matches('/')
        )
    }

    /// Signs and submits one payload. Never retried.
    #[instrument(skip(self, payload), fields(function = %payload.function))]
    async fn submit(&self, payload: EntryFunctionPayload) -> Result<TxHandle, ChainError> {
        let Some(sender) = self.config.account().clone() else {
            debug!("No account connected, skipping transaction");
            return Err(ChainError::new(ChainErrorKind::NotConnected));
        };

        let request = SubmitRequest::new(sender, payload);
        debug!(url = %self.submit_url(), "Sending transaction to wallet");
        let response = self
            .client
            .post(self.submit_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Wallet request failed");
                ChainError::from(e)
            })?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Wallet rejected transaction");
            return Err(ChainError::new(ChainErrorKind::Rejected(format!(
                "{}: {}",
                status, body
            ))));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Wallet bridge error");
            return Err(ChainError::new(ChainErrorKind::Network(format!(
                "{}: {}",
                status, body
            ))));
        }

        let text = response.text().await?;
        let reply: SubmitResponse = serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, body = %text, "Failed to parse wallet response");
            ChainError::new(ChainErrorKind::MalformedResponse(e.to_string()))
        })?;

        if !reply.success {
            error!(hash = %reply.hash, vm_status = %reply.vm_status, "Transaction aborted");
            return Err(ChainError::new(ChainErrorKind::Reverted(reply.vm_status)));
        }

        info!(hash = %reply.hash, "Transaction committed");
        Ok(TxHandle::new(reply.hash))
    }
}

#[async_trait::async_trait]
impl ChainNotifier for WalletNotifier {
    #[instrument(skip(self))]
    async fn create_game(&self, persona: Persona, game_id: u64) -> Result<TxHandle, ChainError> {
        debug!(game_id, code = persona.code(), "Creating game on chain");
        self.submit(EntryFunctionPayload::create_game(&self.config, persona))
            .await
    }

    #[instrument(skip(self))]
    async fn report_winner(&self, game_id: u64, player_won: bool) -> Result<TxHandle, ChainError> {
        self.submit(EntryFunctionPayload::set_winner(
            &self.config,
            game_id,
            player_won,
        ))
        .await
    }
}
