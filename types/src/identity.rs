//! The social identity driving the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric social-account identifier, supplied by the host runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocialId(u64);

impl SocialId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SocialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved social profile. Created once on session start from the
/// social-graph response, immutable thereafter, discarded on session end.
///
/// `activity_score` distinguishes "provider reported zero" (`Some(0.0)`)
/// from "provider had no score" (`None`) — the two render differently.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub social_id: SocialId,
    pub handle: String,
    pub avatar_url: String,
    pub activity_score: Option<f64>,
    pub follower_count: Option<u64>,
    pub following_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_id_round_trips() {
        let id = SocialId::new(12142);
        assert_eq!(id.as_u64(), 12142);
        assert_eq!(id.to_string(), "12142");
    }

    #[test]
    fn zero_score_is_not_absent() {
        let with_zero = Identity {
            social_id: SocialId::new(1),
            handle: "user".into(),
            avatar_url: String::new(),
            activity_score: Some(0.0),
            follower_count: None,
            following_count: None,
        };
        assert!(with_zero.activity_score.is_some());
    }
}
