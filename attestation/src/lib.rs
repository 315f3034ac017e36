//! Verification checker — reduces attestation-registry lookups over an
//! address set to two booleans: identity-verified and social-verified.
//!
//! The registry exposes a GraphQL endpoint filtered by schema identifier,
//! recipient membership and revocation flag. Only the existence of matches
//! is consumed, never attestation content. Failures fail closed: an
//! unreachable registry reads as unverified, never as an error the UI has
//! to handle.

pub mod client;
pub mod error;

pub use client::{AttestationClient, IDENTITY_SCHEMA_UID, SOCIAL_LINK_SCHEMA_UID};
pub use error::AttestationError;
