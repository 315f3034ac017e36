//! Session orchestration for the dashboard.
//!
//! One session per page load: the host context supplies a social
//! identity, the resolver turns it into an address set, and verification,
//! reputation and transaction-count lookups fan out concurrently from
//! there. Each widget of the dashboard reaches readiness independently;
//! a slow provider never blocks the others, and a stale in-flight result
//! never overwrites newer state.

pub mod config;
pub mod context;
pub mod error;
pub mod session;
pub mod sources;
pub mod state;

pub use config::DashboardConfig;
pub use context::HostContext;
pub use error::SessionError;
pub use session::Session;
pub use sources::{IdentitySource, ReputationSource, VerificationSource};
pub use state::{DashboardState, SessionToken, Widget};
