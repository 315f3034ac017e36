//! Chain access for the dashboard: address-based JSON-RPC reads
//! (transaction counts, receipts) and the boost transaction driver.
//!
//! Wallet connection and transaction signing live in an external wallet
//! connector; this crate only defines the seam ([`WalletConnector`]) and
//! drives the boost state machine through it.

pub mod boost;
pub mod error;
pub mod rpc;
pub mod wallet;

pub use boost::{BoostConfig, BoostDriver};
pub use error::ChainError;
pub use rpc::{ChainReader, RpcClient, TransactionReceipt};
pub use wallet::{BoostCall, WalletCapabilities, WalletConnector, WalletError};
