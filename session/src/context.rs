//! The host runtime context.
//!
//! The surrounding mini-app runtime supplies the active social identity
//! and a handful of opaque capabilities ("add this app", "open url",
//! "send token"). It is passed in explicitly — never read as ambient
//! global state — so the aggregation workflow stays testable in
//! isolation.

use repdash_types::SocialId;

/// Context injected by the host runtime at session start.
#[derive(Clone, Debug, Default)]
pub struct HostContext {
    /// The active social identity, when the host has one.
    pub social_id: Option<SocialId>,
    /// Whether the host exposes the open-external-url action.
    pub can_open_url: bool,
    /// Whether the host exposes the send-token action.
    pub can_send_token: bool,
}

impl HostContext {
    pub fn with_social_id(social_id: SocialId) -> Self {
        Self {
            social_id: Some(social_id),
            ..Default::default()
        }
    }

    /// An anonymous context: no identity, dashboard shows connect-wallet
    /// state.
    pub fn anonymous() -> Self {
        Self::default()
    }
}
