//! The wallet connector seam.
//!
//! Wallet connection, signing and broadcast are owned by an external
//! wallet-connector library; the dashboard only submits a prepared call
//! through this trait and interprets the outcome.

use repdash_types::WalletAddress;
use thiserror::Error;

/// Capabilities advertised by the connected wallet.
#[derive(Clone, Debug, Default)]
pub struct WalletCapabilities {
    /// Chain ids on which the wallet supports gas-sponsored submission.
    pub sponsored_chains: Vec<u64>,
}

impl WalletCapabilities {
    pub fn supports_sponsorship(&self, chain_id: u64) -> bool {
        self.sponsored_chains.contains(&chain_id)
    }
}

/// A prepared zero-argument contract call.
#[derive(Clone, Debug, PartialEq)]
pub struct BoostCall {
    pub to: WalletAddress,
    pub value_wei: u128,
    /// Call data; for the boost this is empty or the attribution suffix.
    pub data: Vec<u8>,
}

/// Outcome categories for a submitted call. The dashboard only
/// distinguishes user cancellation from every other failure.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("cancelled by user")]
    Rejected,

    #[error("simulation reverted: {0}")]
    Reverted(String),

    #[error("wallet error: {0}")]
    Other(String),
}

impl WalletError {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// External collaborator: the connected wallet.
pub trait WalletConnector {
    /// The currently connected account.
    fn connected_address(&self) -> Option<WalletAddress>;

    /// Capabilities on the active chain.
    fn capabilities(&self) -> WalletCapabilities;

    /// Submit a call; `sponsored` routes it through the wallet's
    /// gas-sponsorship capability. Returns the transaction hash on
    /// acceptance.
    fn submit(
        &self,
        call: &BoostCall,
        sponsored: bool,
    ) -> impl std::future::Future<Output = Result<String, WalletError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sponsorship_is_per_chain() {
        let caps = WalletCapabilities {
            sponsored_chains: vec![8453],
        };
        assert!(caps.supports_sponsorship(8453));
        assert!(!caps.supports_sponsorship(10));
    }

    #[test]
    fn rejection_is_a_cancellation() {
        assert!(WalletError::Rejected.is_cancellation());
        assert!(!WalletError::Other("boom".into()).is_cancellation());
    }
}
