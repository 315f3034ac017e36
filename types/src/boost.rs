//! Boost transaction state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle of one boost attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoostStatus {
    /// No boost in flight.
    #[default]
    Idle,
    /// Call is being prepared / awaiting wallet acceptance.
    Preparing,
    /// Wallet accepted; transaction broadcast, awaiting receipt.
    Submitted,
    /// Receipt confirmed success.
    Confirmed,
    /// Wallet rejection, simulation revert, or receipt failure.
    Failed,
}

impl BoostStatus {
    /// Confirmed and Failed are terminal; a new attempt starts fresh.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }

    /// Legal forward transitions of the state machine.
    pub fn can_transition_to(&self, next: BoostStatus) -> bool {
        use BoostStatus::*;
        matches!(
            (self, next),
            (Idle, Preparing)
                | (Preparing, Submitted)
                | (Preparing, Failed)
                | (Submitted, Confirmed)
                | (Submitted, Failed)
        )
    }
}

/// One boost attempt. Created per invocation, never persisted across
/// sessions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoostTransaction {
    pub status: BoostStatus,
    pub hash: Option<String>,
    /// Human-readable status text; the only error surface the UI needs.
    pub error_message: Option<String>,
}

impl BoostTransaction {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn preparing() -> Self {
        Self {
            status: BoostStatus::Preparing,
            ..Default::default()
        }
    }

    pub fn submitted(hash: String) -> Self {
        Self {
            status: BoostStatus::Submitted,
            hash: Some(hash),
            error_message: None,
        }
    }

    pub fn confirmed(hash: String) -> Self {
        Self {
            status: BoostStatus::Confirmed,
            hash: Some(hash),
            error_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: BoostStatus::Failed,
            hash: None,
            error_message: Some(message.into()),
        }
    }

    /// Failure that happened after broadcast — keeps the hash for display.
    pub fn failed_with_hash(hash: String, message: impl Into<String>) -> Self {
        Self {
            status: BoostStatus::Failed,
            hash: Some(hash),
            error_message: Some(message.into()),
        }
    }
}
