//! The boost transaction driver.
//!
//! Drives one boost attempt through the state machine in
//! [`repdash_types::BoostStatus`]: prepare the fixed contract call, submit
//! it through the wallet connector (sponsored when the paymaster is
//! configured and the wallet supports it on the active chain), then wait
//! for the receipt.

use repdash_types::{BoostTransaction, WalletAddress};
use tracing::{debug, info, warn};

use crate::rpc::ChainReader;
use crate::wallet::{BoostCall, WalletConnector};

/// Fixed attribution suffix appended to the call data. Identifies this app
/// as the transaction's origin for off-chain analytics only; it has no
/// on-chain behavioral effect.
const ATTRIBUTION_SUFFIX_HEX: &str = "72657064617368";

/// Static parameters of the boost call.
#[derive(Clone, Debug)]
pub struct BoostConfig {
    /// The fixed contract being called.
    pub contract: WalletAddress,
    /// Active chain id, for capability negotiation.
    pub chain_id: u64,
    /// Whether a gas-sponsorship endpoint is configured at all.
    pub paymaster_configured: bool,
}

/// Drives boost attempts against a wallet connector and a chain reader.
pub struct BoostDriver<W, C> {
    wallet: W,
    chain: C,
    config: BoostConfig,
}

impl<W: WalletConnector, C: ChainReader> BoostDriver<W, C> {
    pub fn new(wallet: W, chain: C, config: BoostConfig) -> Self {
        Self {
            wallet,
            chain,
            config,
        }
    }

    /// Run one boost attempt to a terminal state.
    ///
    /// Never returns an error: every failure mode collapses into a
    /// `Failed` transaction with human-readable status text.
    pub async fn boost(&self) -> BoostTransaction {
        if self.wallet.connected_address().is_none() {
            return BoostTransaction::failed("no wallet connected");
        }

        let call = self.build_call();
        let sponsored = self.config.paymaster_configured
            && self
                .wallet
                .capabilities()
                .supports_sponsorship(self.config.chain_id);
        debug!(sponsored, "submitting boost call");

        // Preparing → Submitted | Failed
        let hash = match self.wallet.submit(&call, sponsored).await {
            Ok(hash) => hash,
            Err(e) if e.is_cancellation() => {
                info!("boost cancelled by user");
                return BoostTransaction::failed("cancelled by user");
            }
            Err(e) => {
                warn!("boost submission failed: {e}");
                return BoostTransaction::failed(e.to_string());
            }
        };
        info!(%hash, "boost submitted");

        // Submitted → Confirmed | Failed
        match self.chain.wait_for_receipt(&hash).await {
            Ok(receipt) if receipt.succeeded() => BoostTransaction::confirmed(hash),
            Ok(_) => BoostTransaction::failed_with_hash(hash, "transaction reverted"),
            Err(e) => {
                warn!("receipt wait failed: {e}");
                BoostTransaction::failed_with_hash(hash, e.to_string())
            }
        }
    }

    /// Prepare the zero-value call, appending the attribution suffix when
    /// it can be constructed. A malformed suffix never blocks the call.
    fn build_call(&self) -> BoostCall {
        BoostCall {
            to: self.config.contract.clone(),
            value_wei: 0,
            data: attribution_suffix().unwrap_or_default(),
        }
    }
}

/// Decode the fixed attribution suffix.
pub fn attribution_suffix() -> Option<Vec<u8>> {
    hex::decode(ATTRIBUTION_SUFFIX_HEX).ok()
}
