//! The session orchestrator.
//!
//! Control flow per load: resolve the identity first (or definitively
//! fail), then fan out verification, reputation and transaction-count
//! lookups concurrently. Results apply independently, each guarded by the
//! session generation token captured when the load started.

use repdash_chain::{BoostConfig, ChainError, ChainReader, RpcClient};
use repdash_reputation::{BuilderClient, ReputationAggregator, StampClient};
use repdash_social::{ResolvedIdentity, SocialGraphClient};
use repdash_types::{
    AddressSet, BoostStatus, BoostTransaction, ReputationSummary, VerificationState,
    WalletAddress,
};
use repdash_attestation::AttestationClient;
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::context::HostContext;
use crate::error::SessionError;
use crate::sources::{IdentitySource, ReputationSource, VerificationSource};
use crate::state::{DashboardState, SessionToken, Widget};

/// A session over live provider clients.
pub type LiveSession =
    Session<SocialGraphClient, AttestationClient, ReputationAggregator, RpcClient>;

/// One dashboard session: sources, view state and the generation counter.
pub struct Session<I, V, R, C> {
    /// Identity resolver; `None` when the social credential is absent
    /// (integration disabled, identity stays unresolved).
    identity_source: Option<I>,
    verification_source: V,
    reputation_source: R,
    chain: C,
    generation: u64,
    state: DashboardState,
}

impl Session<SocialGraphClient, AttestationClient, ReputationAggregator, RpcClient> {
    /// Build a live session from configuration. Integrations without a
    /// credential are left unconfigured rather than failing.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let identity_source = config
            .social_api_key
            .as_deref()
            .map(|key| SocialGraphClient::new(&config.social_api_url, key));
        if identity_source.is_none() {
            info!("no social api credential — identity resolution disabled");
        }

        let stamp = config
            .stamp_api_key
            .as_deref()
            .map(|key| StampClient::new(&config.stamp_api_url, key));
        let builder = config
            .builder_api_key
            .as_deref()
            .map(|key| BuilderClient::new(&config.builder_api_url, key));

        Session::new(
            identity_source,
            AttestationClient::new(&config.attestation_url),
            ReputationAggregator::new(stamp, builder),
            RpcClient::new(&config.rpc_url),
        )
    }
}

impl<I, V, R, C> Session<I, V, R, C>
where
    I: IdentitySource,
    V: VerificationSource,
    R: ReputationSource,
    C: ChainReader,
{
    pub fn new(identity_source: Option<I>, verification: V, reputation: R, chain: C) -> Self {
        Self {
            identity_source,
            verification_source: verification,
            reputation_source: reputation,
            chain,
            generation: 0,
            state: DashboardState::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// The current generation token. In-flight work captures this and
    /// must present it again when applying results.
    pub fn token(&self) -> SessionToken {
        SessionToken(self.generation)
    }

    /// Start a new generation: outstanding results from earlier
    /// generations will be discarded on apply. Resets the view state.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = DashboardState::default();
    }

    fn is_current(&self, token: SessionToken) -> bool {
        token == self.token()
    }

    /// Run one full load for the given host context.
    ///
    /// The identity must resolve (or definitively fail) before anything
    /// else runs; verification, reputation and the transaction count then
    /// fetch concurrently and land independently.
    pub async fn load(&mut self, ctx: &HostContext) {
        let token = self.token();

        let resolved = match (&self.identity_source, ctx.social_id) {
            (Some(source), Some(social_id)) => match source.resolve(social_id).await {
                Ok(resolved) => resolved,
                Err(e) => {
                    warn!("identity resolution failed: {e}");
                    self.mark_unresolved(token);
                    return;
                }
            },
            _ => {
                // Missing credential or anonymous context: not an error,
                // the dashboard shows its connect-wallet state.
                self.mark_unresolved(token);
                return;
            }
        };

        let addresses = resolved.addresses.clone();
        let social_id = ctx.social_id;
        if !self.apply_identity(token, resolved) {
            return;
        }

        let (verification, reputation, tx_count) = tokio::join!(
            self.verification_source.check(&addresses),
            self.reputation_source.fetch(&addresses, social_id),
            fetch_primary_tx_count(&self.chain, &addresses),
        );

        self.apply_verification(token, verification);
        self.apply_reputation(token, reputation);
        self.apply_tx_count(token, tx_count);
    }

    /// Re-run the reputation fetch for the single currently-connected
    /// address (manual refresh).
    pub async fn refresh_reputation(&mut self, connected: WalletAddress) {
        let token = self.token();
        let single = AddressSet::from_parts(connected, []);
        let summary = self.reputation_source.fetch(&single, None).await;
        self.apply_reputation(token, summary);
    }

    /// Transaction count for an arbitrary address (the "search wallet"
    /// flow); does not touch session state.
    pub async fn lookup_transaction_count(
        &self,
        address: &WalletAddress,
    ) -> Result<u64, ChainError> {
        self.chain.transaction_count(address).await
    }

    /// Record a finished boost attempt. A confirmed boost refreshes the
    /// primary transaction count; provider scores are not re-polled (they
    /// update on their own schedule).
    pub async fn apply_boost(&mut self, boost: BoostTransaction) {
        let confirmed = boost.status == BoostStatus::Confirmed;
        self.state.boost = boost;
        if confirmed {
            let token = self.token();
            if let Some(addresses) = self.state.addresses.clone() {
                let count = fetch_primary_tx_count(&self.chain, &addresses).await;
                self.apply_tx_count(token, count);
            }
        }
    }

    // ── Guarded state application ──────────────────────────────────────

    fn mark_unresolved(&mut self, token: SessionToken) {
        if !self.is_current(token) {
            return;
        }
        self.state.identity = Widget::Unavailable;
        self.state.addresses = None;
        self.state.verification = Widget::Unavailable;
        self.state.reputation = Widget::Unavailable;
        self.state.tx_count = Widget::Unavailable;
    }

    fn apply_identity(&mut self, token: SessionToken, resolved: ResolvedIdentity) -> bool {
        if !self.is_current(token) {
            debug!("discarding stale identity result");
            return false;
        }
        self.state.identity = Widget::Ready(resolved.identity);
        self.state.addresses = Some(resolved.addresses);
        true
    }

    fn apply_verification(&mut self, token: SessionToken, verification: VerificationState) {
        if !self.is_current(token) {
            debug!("discarding stale verification result");
            return;
        }
        self.state.verification = Widget::Ready(verification);
    }

    fn apply_reputation(&mut self, token: SessionToken, summary: ReputationSummary) {
        if !self.is_current(token) {
            debug!("discarding stale reputation result");
            return;
        }
        self.state.reputation = Widget::Ready(summary);
    }

    fn apply_tx_count(&mut self, token: SessionToken, count: Widget<u64>) {
        if !self.is_current(token) {
            debug!("discarding stale tx count result");
            return;
        }
        self.state.tx_count = count;
    }
}

/// Transaction count of the primary address, collapsed to a widget state:
/// read failures are logged and show as no-data, never as errors.
async fn fetch_primary_tx_count<C: ChainReader>(
    chain: &C,
    addresses: &AddressSet,
) -> Widget<u64> {
    let Some(primary) = addresses.primary() else {
        return Widget::Unavailable;
    };
    match chain.transaction_count(primary).await {
        Ok(count) => Widget::Ready(count),
        Err(e) => {
            warn!("transaction count lookup failed: {e}");
            Widget::Unavailable
        }
    }
}

/// Boost parameters derived from configuration.
pub fn boost_config(config: &DashboardConfig) -> Result<BoostConfig, SessionError> {
    let contract = WalletAddress::parse(config.boost_contract.clone())
        .map_err(|e| SessionError::Config(e.to_string()))?;
    Ok(BoostConfig {
        contract,
        chain_id: config.chain_id,
        paymaster_configured: config.paymaster_url.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use repdash_social::SocialError;
    use repdash_types::{BuilderStanding, Identity, SocialId};

    fn addr(s: &str) -> WalletAddress {
        WalletAddress::parse(s).unwrap()
    }

    fn resolved_fixture() -> ResolvedIdentity {
        ResolvedIdentity {
            identity: Identity {
                social_id: SocialId::new(42),
                handle: "builder".into(),
                avatar_url: String::new(),
                activity_score: Some(0.87),
                follower_count: Some(10),
                following_count: Some(5),
            },
            addresses: AddressSet::from_parts(
                addr("0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"),
                vec![addr("0xBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB")],
            ),
        }
    }

    /// Identity fake: resolves a fixture or fails like a network error.
    struct FakeIdentity {
        fail: bool,
    }

    impl IdentitySource for FakeIdentity {
        async fn resolve(&self, _id: SocialId) -> Result<ResolvedIdentity, SocialError> {
            if self.fail {
                Err(SocialError::Http("connection refused".into()))
            } else {
                Ok(resolved_fixture())
            }
        }
    }

    /// Registry fake backed by a controlled set of attested recipients
    /// (stored lowercase, like the live registry).
    struct FakeRegistry {
        identity_attested: Vec<String>,
    }

    impl VerificationSource for FakeRegistry {
        async fn check(&self, addresses: &AddressSet) -> VerificationState {
            let identity_verified = addresses
                .normalized()
                .iter()
                .any(|a| self.identity_attested.contains(a));
            VerificationState {
                identity_verified,
                social_verified: identity_verified,
            }
        }
    }

    struct FakeReputation {
        summary: ReputationSummary,
    }

    impl ReputationSource for FakeReputation {
        async fn fetch(
            &self,
            _addresses: &AddressSet,
            _social_id: Option<SocialId>,
        ) -> ReputationSummary {
            self.summary.clone()
        }
    }

    struct FakeChain {
        count: u64,
    }

    impl ChainReader for FakeChain {
        async fn transaction_count(&self, _address: &WalletAddress) -> Result<u64, ChainError> {
            Ok(self.count)
        }

        async fn wait_for_receipt(
            &self,
            _tx_hash: &str,
        ) -> Result<repdash_chain::TransactionReceipt, ChainError> {
            Err(ChainError::Http("not used".into()))
        }
    }

    fn session(
        fail_identity: bool,
        attested: Vec<String>,
    ) -> Session<FakeIdentity, FakeRegistry, FakeReputation, FakeChain> {
        Session::new(
            Some(FakeIdentity {
                fail: fail_identity,
            }),
            FakeRegistry {
                identity_attested: attested,
            },
            FakeReputation {
                summary: ReputationSummary {
                    stamp_score: Some(3.5),
                    builder: Some(BuilderStanding {
                        builder_points: 10.0,
                        creator_points: 0.0,
                        rank: Some(500),
                    }),
                },
            },
            FakeChain { count: 7 },
        )
    }

    #[tokio::test]
    async fn full_load_populates_every_widget() {
        let mut s = session(
            false,
            vec!["0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".into()],
        );
        s.load(&HostContext::with_social_id(SocialId::new(42))).await;

        let state = s.state();
        assert!(state.is_resolved());
        assert_eq!(state.addresses.as_ref().unwrap().len(), 2);
        assert_eq!(
            state.verification.ready(),
            Some(&VerificationState {
                identity_verified: true,
                social_verified: true,
            })
        );
        assert_eq!(state.reputation.ready().unwrap().stamp_score, Some(3.5));
        assert_eq!(state.tx_count.ready(), Some(&7));
    }

    #[tokio::test]
    async fn attestation_on_lowercased_verified_address_counts() {
        // Registry stores 0xbbb… lowercase; the resolved set carries the
        // uppercase form. Case-insensitive matching must still verify.
        let mut s = session(
            false,
            vec!["0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".into()],
        );
        s.load(&HostContext::with_social_id(SocialId::new(42))).await;
        assert!(s.state().verification.ready().unwrap().identity_verified);
    }

    #[tokio::test]
    async fn resolver_failure_leaves_identity_unresolved() {
        let mut s = session(true, vec![]);
        s.load(&HostContext::with_social_id(SocialId::new(42))).await;

        let state = s.state();
        assert!(!state.is_resolved());
        assert_eq!(state.identity, Widget::Unavailable);
        assert!(state.addresses.is_none());
        // UI stays usable; no widget is stuck loading.
        assert_eq!(state.verification, Widget::Unavailable);
        assert_eq!(state.reputation, Widget::Unavailable);
    }

    #[tokio::test]
    async fn anonymous_context_skips_resolution() {
        let mut s = session(false, vec![]);
        s.load(&HostContext::anonymous()).await;
        assert!(!s.state().is_resolved());
    }

    #[tokio::test]
    async fn missing_credential_disables_resolution() {
        let mut s: Session<FakeIdentity, _, _, _> = Session::new(
            None,
            FakeRegistry {
                identity_attested: vec![],
            },
            FakeReputation {
                summary: ReputationSummary::default(),
            },
            FakeChain { count: 0 },
        );
        s.load(&HostContext::with_social_id(SocialId::new(42))).await;
        assert!(!s.state().is_resolved());
    }

    #[tokio::test]
    async fn stale_results_are_discarded_after_reset() {
        let mut s = session(false, vec![]);
        let stale = s.token();
        s.reset();

        s.apply_reputation(stale, ReputationSummary::default());
        assert_eq!(s.state().reputation, Widget::Loading);

        // Results carrying the current token still apply.
        let current = s.token();
        s.apply_reputation(current, ReputationSummary::default());
        assert!(s.state().reputation.is_ready());
    }

    #[tokio::test]
    async fn confirmed_boost_refreshes_tx_count() {
        let mut s = session(false, vec![]);
        s.load(&HostContext::with_social_id(SocialId::new(42))).await;

        s.apply_boost(BoostTransaction::confirmed("0xf00d".into()))
            .await;
        assert_eq!(s.state().boost.status, BoostStatus::Confirmed);
        assert!(s.state().tx_count.is_ready());
    }

    #[tokio::test]
    async fn failed_boost_leaves_scores_untouched() {
        let mut s = session(false, vec![]);
        s.load(&HostContext::with_social_id(SocialId::new(42))).await;
        let reputation_before = s.state().reputation.clone();

        s.apply_boost(BoostTransaction::failed("cancelled by user"))
            .await;
        assert_eq!(s.state().boost.status, BoostStatus::Failed);
        assert_eq!(
            s.state().boost.error_message.as_deref(),
            Some("cancelled by user")
        );
        assert_eq!(s.state().reputation, reputation_before);
        assert_eq!(s.state().addresses.as_ref().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn refresh_reputation_targets_single_address() {
        let mut s = session(false, vec![]);
        s.load(&HostContext::with_social_id(SocialId::new(42))).await;
        s.refresh_reputation(addr("0xCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCC"))
            .await;
        assert!(s.state().reputation.is_ready());
    }

    #[test]
    fn boost_config_requires_valid_contract() {
        let mut config = DashboardConfig::default();
        let bc = boost_config(&config).expect("default contract is valid");
        assert_eq!(bc.chain_id, 8453);
        assert!(!bc.paymaster_configured);

        config.paymaster_url = Some("https://paymaster.example".into());
        assert!(boost_config(&config).unwrap().paymaster_configured);

        config.boost_contract = "not-an-address".into();
        assert!(boost_config(&config).is_err());
    }
}
