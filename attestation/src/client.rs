//! GraphQL client for the attestation registry.

use repdash_types::{AddressSet, VerificationState};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::AttestationError;

/// Schema identifier for identity attestations.
pub const IDENTITY_SCHEMA_UID: &str =
    "0xf8b05c79f090979bf4a80270aba232dff11a10d9ca55c4f88de95317970f0de9";

/// Schema identifier for social/Twitter-linkage attestations.
pub const SOCIAL_LINK_SCHEMA_UID: &str =
    "0x7929cd2b3da7b5e4b0ee8bcd1e504f1b53f66be42a1b1ac99b7aeb7b21bce916";

/// Request timeout for the batched registry query.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Both result sets are fetched in one round trip under these aliases.
const VERIFICATION_QUERY: &str = r#"
query Verifications($identity: AttestationWhereInput, $social: AttestationWhereInput) {
  identity: attestations(where: $identity) { id }
  social: attestations(where: $social) { id }
}
"#;

/// GraphQL client for the attestation registry.
pub struct AttestationClient {
    endpoint: String,
    client: reqwest::Client,
}

// ── Wire format ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<QueryData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct QueryData {
    #[serde(default)]
    identity: Vec<AttestationRef>,
    #[serde(default)]
    social: Vec<AttestationRef>,
}

#[derive(Debug, Deserialize)]
struct AttestationRef {
    #[allow(dead_code)]
    id: String,
}

impl AttestationClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Check verification flags for an address set, fail-closed.
    ///
    /// Any request or decode failure is logged and reads as unverified —
    /// a registry outage must not block the rest of the dashboard.
    pub async fn check_verifications(&self, addresses: &AddressSet) -> VerificationState {
        match self.try_check(addresses).await {
            Ok(state) => state,
            Err(e) => {
                warn!("verification check failed, treating as unverified: {e}");
                VerificationState::unverified()
            }
        }
    }

    /// Fallible verification check, one batched round trip.
    pub async fn try_check(
        &self,
        addresses: &AddressSet,
    ) -> Result<VerificationState, AttestationError> {
        if addresses.is_empty() {
            return Ok(VerificationState::unverified());
        }

        let body = build_query_body(addresses);
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AttestationError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(AttestationError::Status(resp.status().as_u16()));
        }

        let parsed: GraphQlResponse = resp
            .json()
            .await
            .map_err(|e| AttestationError::Decode(e.to_string()))?;

        if let Some(err) = parsed.errors.first() {
            return Err(AttestationError::Query(err.message.clone()));
        }

        Ok(reduce_response(parsed.data.unwrap_or_default()))
    }
}

/// Build the batched query body. Recipients are lowercased — the registry
/// matches recipients case-sensitively and stores them lowercase.
fn build_query_body(addresses: &AddressSet) -> Value {
    let recipients = addresses.normalized();
    json!({
        "query": VERIFICATION_QUERY,
        "variables": {
            "identity": {
                "schemaId": { "equals": IDENTITY_SCHEMA_UID },
                "recipient": { "in": recipients },
                "revoked": { "equals": false },
            },
            "social": {
                "schemaId": { "in": [IDENTITY_SCHEMA_UID, SOCIAL_LINK_SCHEMA_UID] },
                "recipient": { "in": recipients },
                "revoked": { "equals": false },
            },
        },
    })
}

/// Reduce the two result sets to flags: any match across any address is
/// sufficient (monotonic OR over the set).
fn reduce_response(data: QueryData) -> VerificationState {
    VerificationState {
        identity_verified: !data.identity.is_empty(),
        social_verified: !data.social.is_empty(),
    }
}
