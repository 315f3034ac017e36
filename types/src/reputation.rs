//! Consolidated reputation scores from the external scoring providers.

use serde::{Deserialize, Serialize};

/// The builder/creator standing reported by the second scoring provider.
///
/// A zero-valued record (no points, no rank) stands in for targets the
/// provider does not index, so reductions over a target list are total.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderStanding {
    pub builder_points: f64,
    pub creator_points: f64,
    /// Leaderboard rank, when the provider knows one. Lower is better.
    pub rank: Option<u64>,
}

impl BuilderStanding {
    /// Whether this record carries any signal worth rendering.
    pub fn has_signal(&self) -> bool {
        self.builder_points > 0.0 || self.creator_points > 0.0 || self.rank.is_some()
    }
}

/// Per-provider reputation results for one address set.
///
/// `None` means "no data / provider unavailable / not configured", never an
/// error: new wallets commonly have no recorded score, and the dashboard
/// invites the user to create one rather than implying a failure. A genuine
/// provider-expressed zero is `Some(0.0)`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReputationSummary {
    /// Stamp/anti-sybil score: max non-zero score across all addresses.
    pub stamp_score: Option<f64>,
    /// Builder/creator standing: best record across addresses and the raw
    /// social identifier.
    pub builder: Option<BuilderStanding>,
}
