//! Attestation-derived verification flags.

use serde::{Deserialize, Serialize};

/// Verification flags derived from attestation lookups over an address set.
///
/// Absence of data reads as `false` — there is no pending tri-state. The
/// flags are recomputed in full whenever the address set changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationState {
    /// At least one address holds a non-revoked identity-schema attestation.
    pub identity_verified: bool,
    /// At least one address holds a non-revoked identity- or
    /// social-linkage-schema attestation.
    pub social_verified: bool,
}

impl VerificationState {
    /// The fail-closed state used when the registry is unreachable.
    pub fn unverified() -> Self {
        Self::default()
    }
}
