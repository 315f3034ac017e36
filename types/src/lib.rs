//! Shared data model for the repdash dashboard.
//!
//! This crate defines the types every other crate in the workspace consumes:
//! wallet addresses and address sets, the resolved social identity,
//! verification flags, reputation summaries, and the boost transaction
//! state machine. Everything here is plain session-lifetime data — nothing
//! is persisted.

pub mod address;
pub mod boost;
pub mod error;
pub mod identity;
pub mod reputation;
pub mod verification;

pub use address::{AddressSet, WalletAddress};
pub use boost::{BoostStatus, BoostTransaction};
pub use error::AddressError;
pub use identity::{Identity, SocialId};
pub use reputation::{BuilderStanding, ReputationSummary};
pub use verification::VerificationState;
