//! Source seams between the orchestrator and the provider clients.
//!
//! The session is generic over these traits so the fan-out control flow,
//! stale-result guard and widget transitions can be exercised with fakes;
//! the live clients implement them by delegation.

use std::future::Future;

use repdash_attestation::AttestationClient;
use repdash_reputation::ReputationAggregator;
use repdash_social::{ResolvedIdentity, SocialError, SocialGraphClient};
use repdash_types::{AddressSet, ReputationSummary, SocialId, VerificationState};

/// Resolves a social identifier into a profile and address set.
pub trait IdentitySource {
    fn resolve(
        &self,
        social_id: SocialId,
    ) -> impl Future<Output = Result<ResolvedIdentity, SocialError>> + Send;
}

/// Derives verification flags for an address set. Infallible by
/// construction: registry failures fail closed inside the source.
pub trait VerificationSource {
    fn check(
        &self,
        addresses: &AddressSet,
    ) -> impl Future<Output = VerificationState> + Send;
}

/// Fetches the consolidated reputation summary for an address set.
pub trait ReputationSource {
    fn fetch(
        &self,
        addresses: &AddressSet,
        social_id: Option<SocialId>,
    ) -> impl Future<Output = ReputationSummary> + Send;
}

impl IdentitySource for SocialGraphClient {
    async fn resolve(&self, social_id: SocialId) -> Result<ResolvedIdentity, SocialError> {
        SocialGraphClient::resolve(self, social_id).await
    }
}

impl VerificationSource for AttestationClient {
    async fn check(&self, addresses: &AddressSet) -> VerificationState {
        self.check_verifications(addresses).await
    }
}

impl ReputationSource for ReputationAggregator {
    async fn fetch(
        &self,
        addresses: &AddressSet,
        social_id: Option<SocialId>,
    ) -> ReputationSummary {
        ReputationAggregator::fetch(self, addresses, social_id).await
    }
}
