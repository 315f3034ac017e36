//! Reduction rules and the two-provider aggregator.

use repdash_types::{AddressSet, BuilderStanding, ReputationSummary, SocialId};

use crate::builder::BuilderClient;
use crate::stamp::StampClient;

/// Maximum non-zero stamp score across per-address results.
///
/// A user may have stamps attached to only one of several linked wallets;
/// taking the max avoids penalizing for using a non-primary wallet. An
/// all-zero list reduces to `None` — "no score yet", not an error and not
/// a zero to display.
pub fn max_stamp_score(scores: &[f64]) -> Option<f64> {
    let max = scores.iter().copied().fold(0.0_f64, f64::max);
    (max > 0.0).then_some(max)
}

/// Pick the better of two builder records.
///
/// Higher builder points win outright. On a points tie, a known rank beats
/// an unknown one, and a numerically lower rank is a strict improvement —
/// but only when the points are equal.
pub fn prefer_standing(best: BuilderStanding, candidate: BuilderStanding) -> BuilderStanding {
    if candidate.builder_points > best.builder_points {
        return candidate;
    }
    if candidate.builder_points == best.builder_points {
        match (best.rank, candidate.rank) {
            (None, Some(_)) => return candidate,
            (Some(b), Some(c)) if c < b => return candidate,
            _ => {}
        }
    }
    best
}

/// Reduce per-target builder records to the single best one.
///
/// Total over a non-empty list: missing targets already contribute
/// zero-valued records, so there is nothing to skip. An empty list reduces
/// to the zero record.
pub fn best_builder_standing(standings: &[BuilderStanding]) -> BuilderStanding {
    standings
        .iter()
        .cloned()
        .fold(BuilderStanding::default(), prefer_standing)
}

/// The two-provider reputation aggregator.
///
/// Each provider is present only when its credential is configured. The
/// providers fetch concurrently and independently: one failing or missing
/// never blocks the other.
#[derive(Default)]
pub struct ReputationAggregator {
    pub stamp: Option<StampClient>,
    pub builder: Option<BuilderClient>,
}

impl ReputationAggregator {
    pub fn new(stamp: Option<StampClient>, builder: Option<BuilderClient>) -> Self {
        Self { stamp, builder }
    }

    /// Whether any provider is configured at all.
    pub fn is_enabled(&self) -> bool {
        self.stamp.is_some() || self.builder.is_some()
    }

    /// Fetch the consolidated reputation summary for an address set.
    ///
    /// The same inputs against the same provider responses always produce
    /// the same summary — there is no state here beyond the HTTP clients.
    pub async fn fetch(
        &self,
        addresses: &AddressSet,
        social_id: Option<SocialId>,
    ) -> ReputationSummary {
        let stamp_fut = async {
            match &self.stamp {
                Some(client) => client.max_score(addresses).await,
                None => None,
            }
        };
        let builder_fut = async {
            match &self.builder {
                Some(client) => client.best_standing(addresses, social_id).await,
                None => None,
            }
        };
        let (stamp_score, builder) = tokio::join!(stamp_fut, builder_fut);

        ReputationSummary {
            stamp_score,
            builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn standing(points: f64, rank: Option<u64>) -> BuilderStanding {
        BuilderStanding {
            builder_points: points,
            creator_points: 0.0,
            rank,
        }
    }

    #[test]
    fn max_reduction_picks_largest() {
        assert_eq!(max_stamp_score(&[0.0, 3.5, 2.1]), Some(3.5));
    }

    #[test]
    fn all_zero_scores_reduce_to_none() {
        assert_eq!(max_stamp_score(&[0.0, 0.0, 0.0]), None);
        assert_eq!(max_stamp_score(&[]), None);
    }

    #[test]
    fn tie_prefers_ranked_entry() {
        let unranked = standing(10.0, None);
        let ranked = standing(10.0, Some(500));
        let best = best_builder_standing(&[unranked, ranked.clone()]);
        assert_eq!(best, ranked);
    }

    #[test]
    fn tie_prefers_lower_rank() {
        let worse = standing(10.0, Some(900));
        let better = standing(10.0, Some(500));
        let best = best_builder_standing(&[worse, better.clone()]);
        assert_eq!(best, better);
    }

    #[test]
    fn higher_points_beat_better_rank() {
        let high_points = standing(20.0, None);
        let low_points_ranked = standing(10.0, Some(1));
        let best = best_builder_standing(&[low_points_ranked, high_points.clone()]);
        assert_eq!(best, high_points);
    }

    #[test]
    fn zero_records_reduce_to_zero_record() {
        let best = best_builder_standing(&[
            BuilderStanding::default(),
            BuilderStanding::default(),
        ]);
        assert_eq!(best, BuilderStanding::default());
    }

    #[test]
    fn unconfigured_aggregator_is_disabled() {
        let agg = ReputationAggregator::default();
        assert!(!agg.is_enabled());
    }

    #[tokio::test]
    async fn unconfigured_aggregator_reports_no_data() {
        let agg = ReputationAggregator::default();
        let set = AddressSet::default();
        let summary = agg.fetch(&set, None).await;
        assert_eq!(summary, ReputationSummary::default());
    }

    #[tokio::test]
    async fn fetch_is_idempotent_for_fixed_inputs() {
        // With no providers configured, the fixed "response" is no data;
        // two fetches must agree.
        let agg = ReputationAggregator::default();
        let set = AddressSet::default();
        let first = agg.fetch(&set, Some(SocialId::new(9))).await;
        let second = agg.fetch(&set, Some(SocialId::new(9))).await;
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn max_reduction_is_order_independent(
            mut scores in proptest::collection::vec(0.0_f64..1000.0, 0..8)
        ) {
            let forward = max_stamp_score(&scores);
            scores.reverse();
            let reversed = max_stamp_score(&scores);
            prop_assert_eq!(forward, reversed);
        }

        #[test]
        fn max_reduction_never_yields_zero(
            scores in proptest::collection::vec(0.0_f64..1000.0, 0..8)
        ) {
            if let Some(max) = max_stamp_score(&scores) {
                prop_assert!(max > 0.0);
            }
        }

        #[test]
        fn best_standing_never_loses_points(
            points in proptest::collection::vec(0.0_f64..1000.0, 1..8)
        ) {
            let standings: Vec<BuilderStanding> =
                points.iter().map(|p| standing(*p, None)).collect();
            let best = best_builder_standing(&standings);
            let max = points.iter().copied().fold(0.0_f64, f64::max);
            prop_assert_eq!(best.builder_points, max);
        }
    }
}
