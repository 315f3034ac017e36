//! Address resolver — turns a social identifier into a profile and the
//! set of wallet addresses it controls.
//!
//! Depends on an external social-graph provider's bulk-user endpoint.
//! The integration is optional: without an API credential the client is
//! never constructed and the identity simply stays unresolved.

pub mod client;
pub mod error;

pub use client::{ResolvedIdentity, SocialGraphClient};
pub use error::SocialError;
