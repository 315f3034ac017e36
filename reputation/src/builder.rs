//! Builder/creator scoring provider (provider B).
//!
//! Unlike the stamp provider, this service indexes both wallet addresses
//! and raw social identifiers, so the target list is the address set plus
//! the social id when one is supplied. Each target yields a list of named
//! sub-scores; "builder" (points + optional rank) and "creator" (points)
//! are the two consumed here.

use futures_util::future::join_all;
use repdash_types::{AddressSet, BuilderStanding, SocialId};
use serde::Deserialize;
use tracing::debug;

use crate::aggregate::best_builder_standing;
use crate::error::ReputationError;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Sub-score slug carrying builder points and rank.
const BUILDER_SLUG: &str = "builder";
/// Sub-score slug carrying creator points.
const CREATOR_SLUG: &str = "creator";

/// A query target for the builder provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScoreTarget {
    Address(String),
    Social(SocialId),
}

impl ScoreTarget {
    fn query_value(&self) -> String {
        match self {
            Self::Address(addr) => addr.clone(),
            Self::Social(id) => id.to_string(),
        }
    }
}

/// HTTP client for the builder scoring provider.
pub struct BuilderClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

// ── Wire format ────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ScoresResponse {
    #[serde(default)]
    scores: Vec<SubScore>,
}

#[derive(Debug, Deserialize)]
struct SubScore {
    slug: String,
    #[serde(default)]
    points: f64,
    rank: Option<u64>,
}

impl BuilderClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Best standing across the address set plus the optional social id.
    ///
    /// All per-target requests run concurrently; targets the provider does
    /// not index contribute a zero-valued record so the reduction is total.
    /// Returns `None` when nothing carries any signal.
    pub async fn best_standing(
        &self,
        addresses: &AddressSet,
        social_id: Option<SocialId>,
    ) -> Option<BuilderStanding> {
        let mut targets: Vec<ScoreTarget> = addresses
            .iter()
            .map(|a| ScoreTarget::Address(a.normalized()))
            .collect();
        if let Some(id) = social_id {
            targets.push(ScoreTarget::Social(id));
        }
        if targets.is_empty() {
            return None;
        }

        let fetches = targets.iter().map(|t| self.standing_for(t));
        let standings: Vec<BuilderStanding> = join_all(fetches).await;
        let best = best_builder_standing(&standings);
        best.has_signal().then_some(best)
    }

    /// Standing for one target; any failure reads as a zero-valued record.
    pub async fn standing_for(&self, target: &ScoreTarget) -> BuilderStanding {
        match self.try_standing_for(target).await {
            Ok(standing) => standing,
            Err(e) => {
                debug!("builder score lookup for {:?} failed: {e}", target);
                BuilderStanding::default()
            }
        }
    }

    async fn try_standing_for(
        &self,
        target: &ScoreTarget,
    ) -> Result<BuilderStanding, ReputationError> {
        let url = format!("{}/scores?id={}", self.base_url, target.query_value());
        let resp = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ReputationError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ReputationError::Status(resp.status().as_u16()));
        }

        let body: ScoresResponse = resp
            .json()
            .await
            .map_err(|e| ReputationError::Decode(e.to_string()))?;

        Ok(extract_standing(body))
    }
}

/// Pull the builder and creator sub-scores out of a provider response.
fn extract_standing(body: ScoresResponse) -> BuilderStanding {
    let mut standing = BuilderStanding::default();
    for sub in body.scores {
        match sub.slug.as_str() {
            BUILDER_SLUG => {
                standing.builder_points = sub.points;
                standing.rank = sub.rank;
            }
            CREATOR_SLUG => {
                standing.creator_points = sub.points;
            }
            _ => {}
        }
    }
    standing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_builder_and_creator_sub_scores() {
        let body: ScoresResponse = serde_json::from_str(
            r#"{"scores": [
                {"slug": "builder", "points": 120.0, "rank": 500},
                {"slug": "creator", "points": 10.5},
                {"slug": "collector", "points": 99.0}
            ]}"#,
        )
        .unwrap();
        let standing = extract_standing(body);
        assert_eq!(standing.builder_points, 120.0);
        assert_eq!(standing.creator_points, 10.5);
        assert_eq!(standing.rank, Some(500));
    }

    #[test]
    fn missing_sub_scores_read_as_zero_record() {
        let body: ScoresResponse = serde_json::from_str(r#"{"scores": []}"#).unwrap();
        let standing = extract_standing(body);
        assert_eq!(standing, BuilderStanding::default());
    }

    #[test]
    fn builder_without_rank_decodes() {
        let body: ScoresResponse = serde_json::from_str(
            r#"{"scores": [{"slug": "builder", "points": 42.0}]}"#,
        )
        .unwrap();
        let standing = extract_standing(body);
        assert_eq!(standing.builder_points, 42.0);
        assert_eq!(standing.rank, None);
    }

    #[test]
    fn social_target_queries_by_raw_id() {
        let target = ScoreTarget::Social(SocialId::new(12142));
        assert_eq!(target.query_value(), "12142");
    }

    #[tokio::test]
    async fn unreachable_provider_yields_zero_record() {
        let client = BuilderClient::new("http://127.0.0.1:1", "key");
        let standing = client
            .standing_for(&ScoreTarget::Social(SocialId::new(1)))
            .await;
        assert_eq!(standing, BuilderStanding::default());
    }

    #[tokio::test]
    async fn no_signal_anywhere_reports_none() {
        let client = BuilderClient::new("http://127.0.0.1:1", "key");
        let set = AddressSet::from_parts(
            repdash_types::WalletAddress::parse(
                "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            )
            .unwrap(),
            vec![],
        );
        let best = client.best_standing(&set, Some(SocialId::new(1))).await;
        assert_eq!(best, None);
    }
}
