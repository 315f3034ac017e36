//! The dashboard view-state model.

use repdash_types::{
    AddressSet, BoostTransaction, Identity, ReputationSummary, VerificationState,
};
use serde::Serialize;

/// Readiness of one dashboard widget. Widgets reach readiness
/// independently — one slow provider leaves only its own widget loading.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Widget<T> {
    /// Fetch outstanding (or never started).
    Loading,
    /// Data arrived.
    Ready(T),
    /// Definitive no-data: failed fetch, disabled integration, or a
    /// provider with nothing recorded.
    Unavailable,
}

// Hand-written so `Widget<T>: Default` holds without `T: Default`.
impl<T> Default for Widget<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> Widget<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }
}

/// Monotonic token identifying one session generation. In-flight results
/// carry the token they were started under; applying a result checks it
/// against the current generation so a late response can never overwrite
/// newer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SessionToken(pub u64);

/// The full view state of one dashboard session.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DashboardState {
    pub identity: Widget<Identity>,
    /// Resolved address set; `None` while the identity is unresolved.
    pub addresses: Option<AddressSet>,
    pub verification: Widget<VerificationState>,
    pub reputation: Widget<ReputationSummary>,
    /// Transaction count of the primary address.
    pub tx_count: Widget<u64>,
    pub boost: BoostTransaction,
}

impl DashboardState {
    /// Whether the dashboard has an identity to show at all. When false
    /// the UI falls back to its connect-wallet state.
    pub fn is_resolved(&self) -> bool {
        self.identity.is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widgets_start_loading() {
        let state = DashboardState::default();
        assert_eq!(state.identity, Widget::Loading);
        assert_eq!(state.verification, Widget::Loading);
        assert_eq!(state.reputation, Widget::Loading);
        assert!(!state.is_resolved());
    }

    #[test]
    fn ready_widget_exposes_value() {
        let w = Widget::Ready(3_u64);
        assert!(w.is_ready());
        assert_eq!(w.ready(), Some(&3));
        assert_eq!(Widget::<u64>::Unavailable.ready(), None);
    }
}
